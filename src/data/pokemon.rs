//! Decoding of Pokémon detail responses

use serde::Deserialize;

use super::{NamedResource, Pokemon, PokemonStat};

/// Raw Pokémon detail response
#[derive(Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    /// Some forms carry `null` here
    base_experience: Option<i64>,
    #[serde(default)]
    height: i64,
    #[serde(default)]
    weight: i64,
    #[serde(default)]
    stats: Vec<StatResponse>,
    #[serde(default)]
    types: Vec<TypeSlotResponse>,
}

#[derive(Debug, Deserialize)]
struct StatResponse {
    base_stat: i64,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct TypeSlotResponse {
    #[serde(rename = "type")]
    kind: NamedResource,
}

impl Pokemon {
    /// Decodes a Pokémon detail from a raw response body
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let response: PokemonResponse = serde_json::from_slice(body)?;

        let stats = response
            .stats
            .into_iter()
            .map(|s| PokemonStat {
                name: s.stat.name,
                value: s.base_stat,
            })
            .collect();

        let types = response.types.into_iter().map(|t| t.kind.name).collect();

        Ok(Pokemon {
            name: response.name,
            base_experience: response.base_experience.unwrap_or(0),
            height: response.height,
            weight: response.weight,
            stats,
            types,
        })
    }
}
