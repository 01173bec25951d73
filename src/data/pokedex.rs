//! Record of captured Pokémon
//!
//! Catching is a single uniform roll against the Pokémon's base experience:
//! the higher the base experience, the less likely the catch.

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;

use super::Pokemon;

/// A roll at or below this value is a successful catch
pub const CATCH_THRESHOLD: i64 = 25;

/// Errors from Pokédex operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PokedexError {
    /// The named Pokémon has never been caught
    #[error("you have not caught {0}")]
    NotCaught(String),

    /// The Pokémon has no usable base experience to roll against
    #[error("{name} has no base experience and cannot be caught")]
    InvalidBaseExperience { name: String },
}

/// A captured Pokémon with the time it was caught
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Captured Pokémon, unique by name, kept in capture order
#[derive(Debug, Default)]
pub struct Pokedex {
    caught: Vec<CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rolls to catch `pokemon`, recording it on success
    ///
    /// # Returns
    /// * `Ok(true)` if caught (an existing record of the same name is replaced)
    /// * `Ok(false)` if it escaped
    /// * `Err(PokedexError::InvalidBaseExperience)` if base experience is not positive
    pub fn try_catch<R: Rng + ?Sized>(
        &mut self,
        pokemon: Pokemon,
        rng: &mut R,
    ) -> Result<bool, PokedexError> {
        if pokemon.base_experience <= 0 {
            return Err(PokedexError::InvalidBaseExperience { name: pokemon.name });
        }

        let roll = rng.gen_range(0..pokemon.base_experience);
        tracing::debug!(
            pokemon = %pokemon.name,
            base_experience = pokemon.base_experience,
            roll,
            "catch roll"
        );
        if roll > CATCH_THRESHOLD {
            return Ok(false);
        }

        self.caught.retain(|c| c.pokemon.name != pokemon.name);
        self.caught.push(CaughtPokemon {
            pokemon,
            caught_at: Utc::now(),
        });
        Ok(true)
    }

    /// Looks up a caught Pokémon by name
    pub fn inspect(&self, name: &str) -> Result<&CaughtPokemon, PokedexError> {
        self.caught
            .iter()
            .find(|c| c.pokemon.name == name)
            .ok_or_else(|| PokedexError::NotCaught(name.to_string()))
    }

    /// Names of every caught Pokémon, in capture order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.caught.iter().map(|c| c.pokemon.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}
