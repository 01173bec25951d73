//! Core data models for the Pokédex
//!
//! This module contains the domain types decoded from PokeAPI responses:
//! paginated listings, location areas, and Pokémon details, plus the
//! in-memory record of captured Pokémon.

pub mod listing;
pub mod pokedex;
pub mod pokemon;

pub use pokedex::{CaughtPokemon, Pokedex, PokedexError, CATCH_THRESHOLD};

use serde::{Deserialize, Serialize};

/// A named reference to another API resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Resource name (e.g. "canalave-city-area")
    pub name: String,
    /// Absolute URL of the resource's detail endpoint
    #[serde(default)]
    pub url: String,
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Total number of items across all pages
    pub count: u64,
    /// Continuation link to the following page, if any
    pub next: Option<String>,
    /// Continuation link to the preceding page, if any
    pub previous: Option<String>,
    /// Items on this page, in server order
    pub results: Vec<NamedResource>,
}

/// A location area and the Pokémon that can be encountered there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationArea {
    /// Area name
    pub name: String,
    /// Names of Pokémon encountered in this area, in server order
    pub pokemon: Vec<String>,
}

/// A single base stat of a Pokémon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    /// Stat name (e.g. "hp", "attack")
    pub name: String,
    /// Base value
    pub value: i64,
}

/// The attributes of a Pokémon needed for catching and inspecting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    /// Base experience; zero when the API has no value
    pub base_experience: i64,
    /// Height in decimetres
    pub height: i64,
    /// Weight in hectograms
    pub weight: i64,
    pub stats: Vec<PokemonStat>,
    /// Type names in slot order
    pub types: Vec<String>,
}
