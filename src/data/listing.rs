//! Decoding of paginated listing and location-area responses

use serde::Deserialize;

use super::{LocationArea, NamedResource, Page};

/// Raw listing response from the API
#[derive(Debug, Deserialize)]
struct PageResponse {
    #[serde(default)]
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    #[serde(default)]
    results: Vec<NamedResource>,
}

/// Raw location-area detail response
#[derive(Debug, Deserialize)]
struct LocationAreaResponse {
    name: String,
    #[serde(default)]
    pokemon_encounters: Vec<EncounterResponse>,
}

#[derive(Debug, Deserialize)]
struct EncounterResponse {
    pokemon: NamedResource,
}

/// The server signals "no link" with either `null` or an empty string
fn non_empty(link: Option<String>) -> Option<String> {
    link.filter(|s| !s.is_empty())
}

impl Page {
    /// Decodes a listing page from a raw response body
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let response: PageResponse = serde_json::from_slice(body)?;
        Ok(Page {
            count: response.count,
            next: non_empty(response.next),
            previous: non_empty(response.previous),
            results: response.results,
        })
    }

    /// Names of the items on this page
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.name.as_str())
    }
}

impl LocationArea {
    /// Decodes a location-area detail from a raw response body
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let response: LocationAreaResponse = serde_json::from_slice(body)?;
        Ok(LocationArea {
            name: response.name,
            pokemon: response
                .pokemon_encounters
                .into_iter()
                .map(|e| e.pokemon.name)
                .collect(),
        })
    }
}
