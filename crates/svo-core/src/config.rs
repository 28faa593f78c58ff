//! Configuration for the knowledge base, search bounds, ranking weights, and data files.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default SPARQL endpoint of the Scientific Variables Ontology.
pub const DEFAULT_SPARQL_ENDPOINT: &str = "http://sparql.geoscienceontology.org";

/// Complete matching configuration.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Remote knowledge base settings
    pub knowledge_base: KnowledgeBaseConfig,
    /// Phrase search settings
    pub search: SearchConfig,
    /// Ranking weights
    pub ranking: RankingConfig,
    /// Category taxonomy source
    pub taxonomy: TaxonomyConfig,
    /// Lexical database source
    pub lexicon: LexiconConfig,
    /// Offline variable catalog
    pub catalog: CatalogConfig,
}

/// Knowledge base configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    /// SPARQL endpoint URL
    pub endpoint: String,
    /// Attempts per phrase search before the error is surfaced
    pub attempts: usize,
    /// Timeout in seconds for a single HTTP request
    pub request_timeout_seconds: u64,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SPARQL_ENDPOINT.to_owned(),
            attempts: 2,
            request_timeout_seconds: 30,
        }
    }
}

/// Phrase search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Character joining the words of a phrase
    pub separator: char,
    /// Upper bound in seconds on one complete phrase search
    pub phrase_timeout_seconds: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            separator: '_',
            phrase_timeout_seconds: Some(120),
        }
    }
}

/// How depth and breadth factors grow while descending into expansions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorMode {
    /// Factors are multiplied by branch counts and branch sizes
    #[default]
    Multiplicative,
    /// Factors are incremented by branch counts and branch sizes
    Additive,
}

/// Ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Weight of the fraction of phrase terms matched
    pub phrase_weight: f64,
    /// Weight of the fraction of variable segments matched
    pub variable_weight: f64,
    /// Score multiplier applied to every variable
    pub base_multiplier: f64,
    /// Additional multiplier scaled by the phenomenon bonus
    pub phenomenon_multiplier: f64,
    /// Decimal places kept in the final score
    pub precision: u32,
    /// Default number of results returned
    pub max_results: usize,
    /// Ontology class that earns the phenomenon bonus
    pub phenomenon_class: String,
    /// Encoded separator counted once more per attribute in a variable id
    pub attribute_separator: String,
    /// Variable id segments that do not count towards its length
    pub ignored_segments: Vec<String>,
    /// Growth of the expansion and term factors
    pub factor_mode: FactorMode,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            phrase_weight: 0.75,
            variable_weight: 0.25,
            base_multiplier: 0.4,
            phenomenon_multiplier: 0.6,
            precision: 3,
            max_results: 5,
            phenomenon_class: "Phenomenon".to_owned(),
            attribute_separator: "%7E".to_owned(),
            ignored_segments: vec!["of".to_owned()],
            factor_mode: FactorMode::default(),
        }
    }
}

/// What to do with reference senses the lexical database cannot resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Drop the sense, log a warning, and report it alongside the category
    #[default]
    Skip,
    /// Fail category construction
    Strict,
}

/// Taxonomy configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Taxonomy TOML file; the built-in SVO taxonomy is used when absent
    pub path: Option<PathBuf>,
    /// Handling of unresolvable reference senses
    pub resolution: ResolutionMode,
}

/// Lexical database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// JSON lexicon file
    pub path: PathBuf,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lexicon.json"),
        }
    }
}

/// Offline catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file; the SPARQL knowledge base is used when absent
    pub path: Option<PathBuf>,
}

impl MatchConfig {
    /// Get the default config directory path (`~/.svo`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Other("Could not determine home directory".to_owned()))?;
        Ok(home.join(".svo"))
    }

    /// Get the default config file path (`~/.svo/config.toml`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from `path`, or from the default location when `path` is `None`.
    /// A missing default file yields the default configuration.
    ///
    /// # Errors
    /// Returns an error if an explicitly given file is missing, or any file cannot be parsed
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        let default_path = Self::config_path()?;
        if default_path.exists() {
            Self::load_from_file(&default_path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", default_path);
            Ok(Self::default())
        }
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;

        tracing::debug!(
            "Loaded config from {:?}: endpoint={}, attempts={}",
            path,
            config.knowledge_base.endpoint,
            config.knowledge_base.attempts
        );

        Ok(config)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|error| Error::Other(format!("Failed to serialize config: {error}")))?;

        let header = "# SVO phrase matching configuration\n\
                      # Edit this file to customize the knowledge base and ranking weights\n\n";

        fs::write(path, format!("{header}{contents}"))?;
        Ok(())
    }

    /// Rejects settings no search could run with.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the offending setting
    pub fn validate(&self) -> Result<()> {
        if self.knowledge_base.attempts == 0 {
            return Err(Error::InvalidConfiguration(
                "knowledge_base.attempts must be at least 1".to_owned(),
            ));
        }
        if self.search.separator.is_alphabetic() {
            return Err(Error::InvalidConfiguration(format!(
                "search.separator '{}' must not be a letter",
                self.search.separator
            )));
        }
        Ok(())
    }
}
