//! Service configuration.
//!
//! Settings are layered, later sources overriding earlier ones:
//! 1. Bundled defaults (`include_str!` from `taleweaver.toml`)
//! 2. `~/.config/taleweaver/taleweaver.toml`
//! 3. `./taleweaver.toml`
//! 4. `TALEWEAVER__SECTION__KEY` environment variables
//!
//! API keys are not part of the file configuration. They are read from the
//! process environment by [`Credentials`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use taleweaver_error::{ConfigError, TaleweaverError, TaleweaverResult};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../taleweaver.toml");

const ENV_PREFIX: &str = "TALEWEAVER";

/// Listening address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// One language model endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier sent with each request
    pub model: String,
    /// API base URL
    pub base_url: String,
}

/// Story text generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryConfig {
    /// Run a network health probe before each provider call
    #[serde(default)]
    pub probe_before_generate: bool,
    /// Per-request timeout applied to every provider, in seconds
    pub timeout_secs: u64,
    /// Anthropic model tried first
    pub primary: ModelConfig,
    /// OpenAI-compatible model tried second
    pub backup: ModelConfig,
}

impl StoryConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Text-to-speech settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationConfig {
    /// Speech model
    pub model: String,
    /// Voice used when the reader has not picked one
    pub default_voice: String,
    /// API base URL
    pub base_url: String,
}

/// Text-to-image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IllustrationConfig {
    /// Stability engine id
    pub engine: String,
    /// API base URL
    pub base_url: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Prompt adherence
    pub cfg_scale: f32,
    /// Diffusion steps
    pub steps: u32,
}

/// Places backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Geoapify API base URL
    pub geoapify_base_url: String,
    /// Google Places API base URL
    pub google_base_url: String,
}

/// Vector-store archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Pinecone namespace
    pub namespace: String,
    /// Index dimension
    pub dimension: usize,
}

/// Where generated media is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for narration and artwork
    pub media_dir: PathBuf,
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaleweaverConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Story generation
    pub story: StoryConfig,
    /// Narration
    pub narration: NarrationConfig,
    /// Illustration
    pub illustration: IllustrationConfig,
    /// Local places
    pub places: PlacesConfig,
    /// Archive
    pub archive: ArchiveConfig,
    /// Media storage
    pub storage: StorageConfig,
}

impl TaleweaverConfig {
    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    /// Load configuration with the full precedence chain.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or a value has the
    /// wrong type.
    #[instrument]
    pub fn load() -> TaleweaverResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");
        Self::layered(Self::environment())
    }

    fn layered(environment: Environment) -> TaleweaverResult<Self> {
        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/taleweaver/taleweaver.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("taleweaver").required(false))
            .add_source(environment);

        Self::finish(builder)
    }

    /// Load the bundled defaults overridden by one file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> TaleweaverResult<Self> {
        debug!("Loading configuration from file");
        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// The bundled defaults alone.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled file is malformed.
    pub fn bundled() -> TaleweaverResult<Self> {
        Self::finish(Self::defaults())
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> TaleweaverResult<Self> {
        builder
            .build()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

/// API keys for every external provider.
///
/// An empty value leaves the matching adapter unconfigured; it reports
/// itself as disabled and is skipped.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// `ANTHROPIC_API_KEY`
    pub anthropic_api_key: String,
    /// `OPENAI_API_KEY`, shared by the backup story model and narration
    pub openai_api_key: String,
    /// `STABILITY_API_KEY`
    pub stability_api_key: String,
    /// `GEOAPIFY_API_KEY`
    pub geoapify_api_key: String,
    /// `GOOGLE_PLACES_API_KEY`
    pub google_places_api_key: String,
    /// `PINECONE_API_KEY`
    pub pinecone_api_key: String,
    /// `PINECONE_INDEX_HOST`
    pub pinecone_index_host: String,
}

impl Credentials {
    /// Read keys from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read keys through an arbitrary lookup, e.g. a map in tests.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_server::Credentials;
    ///
    /// let credentials = Credentials::from_lookup(|name| {
    ///     (name == "ANTHROPIC_API_KEY").then(|| "sk-ant".to_string())
    /// });
    /// assert_eq!(credentials.anthropic_api_key, "sk-ant");
    /// assert!(credentials.openai_api_key.is_empty());
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };
        Self {
            anthropic_api_key: read("ANTHROPIC_API_KEY"),
            openai_api_key: read("OPENAI_API_KEY"),
            stability_api_key: read("STABILITY_API_KEY"),
            geoapify_api_key: read("GEOAPIFY_API_KEY"),
            google_places_api_key: read("GOOGLE_PLACES_API_KEY"),
            pinecone_api_key: read("PINECONE_API_KEY"),
            pinecone_index_host: read("PINECONE_INDEX_HOST"),
        }
    }

    /// Names of the keys that are set.
    pub fn present(&self) -> Vec<&'static str> {
        [
            ("ANTHROPIC_API_KEY", &self.anthropic_api_key),
            ("OPENAI_API_KEY", &self.openai_api_key),
            ("STABILITY_API_KEY", &self.stability_api_key),
            ("GEOAPIFY_API_KEY", &self.geoapify_api_key),
            ("GOOGLE_PLACES_API_KEY", &self.google_places_api_key),
            ("PINECONE_API_KEY", &self.pinecone_api_key),
            ("PINECONE_INDEX_HOST", &self.pinecone_index_host),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("present", &self.present())
            .finish()
    }
}
