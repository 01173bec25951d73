//! Application state and command handling for the Pokedex REPL
//!
//! The `App` owns the caching API client, the pagination cursor and the record of
//! caught Pokémon. Each command runs to completion before the next is read, so
//! none of this state needs locking.

use std::fmt::Write as _;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::api::{
    ApiError, HttpTransport, Navigation, PaginationCursor, PokeClient, ResourceKind, Transport,
};
use crate::cli::StartupConfig;
use crate::commands::{help_text, Command, CommandError};
use crate::data::{Pokedex, PokedexError};

/// Any error a command can surface to the user
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Pokedex(#[from] PokedexError),
}

/// What the REPL should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print the text and read the next command
    Output(String),
    /// Stop the REPL
    Exit,
}

/// Main application struct managing state
pub struct App<T: Transport = HttpTransport> {
    client: PokeClient<T>,
    cursor: PaginationCursor,
    pokedex: Pokedex,
    rng: StdRng,
}

impl App<HttpTransport> {
    /// Creates an App talking to the real API, as configured on the command line
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_config(config: &StartupConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(config.request_timeout)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> App<T> {
    /// Creates an App over an arbitrary transport
    pub fn with_transport(transport: T, config: &StartupConfig) -> Self {
        Self {
            client: PokeClient::new(transport, config.base_url.clone(), config.cache_ttl),
            cursor: PaginationCursor::new(config.base_url.clone(), config.page_size),
            pokedex: Pokedex::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Replaces the random source used for catch rolls
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn client(&self) -> &PokeClient<T> {
        &self.client
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// Parses and executes one input line
    ///
    /// Blank lines produce empty output.
    pub async fn handle_line(&mut self, line: &str) -> Result<Reply, AppError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).await,
            None => Ok(Reply::Output(String::new())),
        }
    }

    /// Executes a parsed command
    pub async fn execute(&mut self, command: Command) -> Result<Reply, AppError> {
        let output = match command {
            Command::Exit => return Ok(Reply::Exit),
            Command::Help => help_text(),
            Command::Map => self.page(ResourceKind::LocationArea, Navigation::Next).await?,
            Command::MapBack => self.page(ResourceKind::LocationArea, Navigation::Previous).await?,
            Command::MapFirst => self.page(ResourceKind::LocationArea, Navigation::First).await?,
            Command::List => self.page(ResourceKind::Pokemon, Navigation::Next).await?,
            Command::ListBack => self.page(ResourceKind::Pokemon, Navigation::Previous).await?,
            Command::ListFirst => self.page(ResourceKind::Pokemon, Navigation::First).await?,
            Command::Explore(area) => self.explore(&area).await?,
            Command::Catch(name) => self.catch(&name).await?,
            Command::Inspect(name) => self.inspect(&name)?,
            Command::Pokedex => self.list_caught(),
        };
        Ok(Reply::Output(output))
    }

    async fn page(
        &mut self,
        kind: ResourceKind,
        navigation: Navigation,
    ) -> Result<String, ApiError> {
        let page = self.client.fetch_page(&mut self.cursor, kind, navigation).await?;
        let mut output = String::new();
        for name in page.names() {
            let _ = writeln!(output, "{}", name);
        }
        Ok(output)
    }

    async fn explore(&self, area: &str) -> Result<String, ApiError> {
        let location = self.client.location_area(area).await?;
        let mut output = format!("Exploring {}...\n", location.name);
        if location.pokemon.is_empty() {
            output.push_str("No Pokemon found.\n");
            return Ok(output);
        }
        output.push_str("Found Pokemon:\n");
        for name in &location.pokemon {
            let _ = writeln!(output, " - {}", name);
        }
        Ok(output)
    }

    async fn catch(&mut self, name: &str) -> Result<String, AppError> {
        let pokemon = self.client.pokemon(name).await?;
        let name = pokemon.name.clone();
        let mut output = format!("Throwing a Pokeball at {}...\n", name);
        if self.pokedex.try_catch(pokemon, &mut self.rng)? {
            // Stored under the API's name, which may differ from what was typed
            let _ = writeln!(output, "{} was caught!", name);
            let _ = writeln!(output, "You may now inspect it with: inspect {}", name);
        } else {
            let _ = writeln!(output, "{} escaped!", name);
        }
        Ok(output)
    }

    fn inspect(&self, name: &str) -> Result<String, PokedexError> {
        let caught = self.pokedex.inspect(name)?;
        let pokemon = &caught.pokemon;

        let mut output = String::new();
        let _ = writeln!(output, "Name: {}", pokemon.name);
        let _ = writeln!(output, "Base experience: {}", pokemon.base_experience);
        let _ = writeln!(output, "Height: {}", pokemon.height);
        let _ = writeln!(output, "Weight: {}", pokemon.weight);
        output.push_str("Stats:\n");
        for stat in &pokemon.stats {
            let _ = writeln!(output, "  -{}: {}", stat.name, stat.value);
        }
        output.push_str("Types:\n");
        for kind in &pokemon.types {
            let _ = writeln!(output, "  - {}", kind);
        }
        let _ = writeln!(output, "Caught: {}", caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC"));
        Ok(output)
    }

    fn list_caught(&self) -> String {
        if self.pokedex.is_empty() {
            return "Your Pokedex is empty. Go catch some Pokemon!\n".to_string();
        }
        let mut output = String::from("Your Pokedex:\n");
        for name in self.pokedex.names() {
            let _ = writeln!(output, " - {}", name);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockTransport;

    const BASE: &str = "http://api.test/v2";

    fn config() -> StartupConfig {
        StartupConfig {
            base_url: BASE.to_string(),
            ..StartupConfig::default()
        }
    }

    fn app(transport: MockTransport) -> App<MockTransport> {
        App::with_transport(transport, &config()).with_rng(StdRng::seed_from_u64(9))
    }

    fn output(reply: Reply) -> String {
        match reply {
            Reply::Output(text) => text,
            Reply::Exit => panic!("expected output, got exit"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_command() {
        let mut app = app(MockTransport::new());
        assert_eq!(app.handle_line("exit").await.unwrap(), Reply::Exit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_line_is_ignored() {
        let mut app = app(MockTransport::new());
        assert_eq!(app.handle_line("   ").await.unwrap(), Reply::Output(String::new()));
        assert_eq!(app.client().cache().len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_lists_commands() {
        let mut app = app(MockTransport::new());
        let text = output(app.handle_line("help").await.unwrap());
        assert!(text.contains("mapb"));
        assert!(text.contains("catch <pokemon>"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_errors_surface() {
        let mut app = app(MockTransport::new());

        let unknown = app.handle_line("teleport").await.unwrap_err();
        let missing = app.handle_line("explore").await.unwrap_err();

        assert!(matches!(unknown, AppError::Command(CommandError::UnknownCommand(_))));
        assert!(matches!(
            missing,
            AppError::Command(CommandError::MissingArgument { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_map_prints_area_names() {
        let transport = MockTransport::with_bodies([(
            "http://api.test/v2/location-area?offset=0&limit=20",
            br#"{"count": 2, "next": null, "previous": null, "results": [
                {"name": "canalave-city-area", "url": ""},
                {"name": "eterna-city-area", "url": ""}
            ]}"#
            .to_vec(),
        )]);
        let mut app = app(transport);

        let text = output(app.handle_line("map").await.unwrap());

        assert_eq!(text, "canalave-city-area\neterna-city-area\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_explore_lists_encounters() {
        let transport = MockTransport::with_bodies([(
            "http://api.test/v2/location-area/pastoria-city-area",
            br#"{"name": "pastoria-city-area", "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": ""}},
                {"pokemon": {"name": "magikarp", "url": ""}}
            ]}"#
            .to_vec(),
        )]);
        let mut app = app(transport);

        let text = output(app.handle_line("explore pastoria-city-area").await.unwrap());

        assert!(text.starts_with("Exploring pastoria-city-area..."));
        assert!(text.contains(" - tentacool\n - magikarp\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_catch_then_inspect() {
        let transport = MockTransport::with_bodies([(
            "http://api.test/v2/pokemon/caterpie",
            br#"{"name": "caterpie", "base_experience": 20, "height": 3, "weight": 29,
                 "stats": [{"base_stat": 45, "stat": {"name": "hp", "url": ""}}],
                 "types": [{"slot": 1, "type": {"name": "bug", "url": ""}}]}"#
                .to_vec(),
        )]);
        let mut app = app(transport);

        let before = app.handle_line("inspect caterpie").await.unwrap_err();
        assert!(matches!(before, AppError::Pokedex(PokedexError::NotCaught(_))));

        // Any roll below 20 is within the catch threshold
        let caught = output(app.handle_line("catch caterpie").await.unwrap());
        assert!(caught.contains("caterpie was caught!"));

        let details = output(app.handle_line("inspect caterpie").await.unwrap());
        assert!(details.contains("Name: caterpie"));
        assert!(details.contains("Height: 3"));
        assert!(details.contains("  -hp: 45"));
        assert!(details.contains("  - bug"));

        let listing = output(app.handle_line("pokedex").await.unwrap());
        assert_eq!(listing, "Your Pokedex:\n - caterpie\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_catch_by_id_reports_stored_name() {
        let transport = MockTransport::with_bodies([(
            "http://api.test/v2/pokemon/25",
            br#"{"name": "pikachu", "base_experience": 1}"#.to_vec(),
        )]);
        let mut app = app(transport);

        // A base experience of 1 always rolls 0
        let caught = output(app.handle_line("catch 25").await.unwrap());
        assert!(caught.contains("pikachu was caught!"));
        assert!(caught.contains("inspect pikachu"));

        let details = output(app.handle_line("inspect pikachu").await.unwrap());
        assert!(details.contains("Name: pikachu"));

        let by_id = app.handle_line("inspect 25").await.unwrap_err();
        assert!(matches!(by_id, AppError::Pokedex(PokedexError::NotCaught(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_names_with_url_syntax_never_reach_the_network() {
        let mut app = app(MockTransport::new());

        let explore = app.handle_line("explore ../pokemon/pikachu").await.unwrap_err();
        let catch = app.handle_line("catch pikachu?x=1").await.unwrap_err();

        assert!(matches!(explore, AppError::Api(ApiError::InvalidName(_))));
        assert!(matches!(catch, AppError::Api(ApiError::InvalidName(_))));
        assert_eq!(app.client().transport().calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_catch_unknown_pokemon_is_fetch_failure() {
        let mut app = app(MockTransport::new());

        let err = app.handle_line("catch nobody").await.unwrap_err();

        assert!(matches!(err, AppError::Api(ApiError::FetchFailed(_))));
        assert!(app.pokedex().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_pokedex_message() {
        let mut app = app(MockTransport::new());
        let text = output(app.handle_line("pokedex").await.unwrap());
        assert!(text.contains("empty"));
    }
}
