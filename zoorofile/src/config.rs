//! Configuration document describing whose activity to render and how.
//!
//! The document is read once at startup and passed explicitly into every
//! pipeline stage. JSON is the primary format (`config.json`); files ending in
//! `.yaml` or `.yml` are decoded as YAML.

use std::{fs, path::Path};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::{self, Error},
    locale::Locale,
    mood::{MoodBandEntry, MoodBands}
};

const DEFAULT_ANIMAL: &str = "raccoon";
const GITHUB_LOGIN_PATTERN: &str = r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,37}[A-Za-z0-9])?$";
const ANIMAL_PATTERN: &str = r"^[a-z0-9][a-z0-9_-]*$";

/// Raw configuration as written by the user.
///
/// # Examples
///
/// ```
/// use zoorofile::{Config, Locale};
///
/// let json = r#"{ "github_username": "octocat", "animal": "fox", "language": "en" }"#;
/// let config: Config = serde_json::from_str(json,).expect("valid configuration",);
/// assert_eq!(config.language, Locale::En);
/// assert!(config.features.weekly_contributions);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// GitHub login whose contributions are tracked.
    #[serde(default, deserialize_with = "null_as_default")]
    pub github_username: String,

    /// Animal used to pick pet images; `null` or blank means `raccoon`.
    #[serde(default = "default_animal", deserialize_with = "animal_or_default")]
    pub animal: String,

    /// Language of the rendered section.
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: Locale,

    /// Optional sections of the rendered block.
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Features,

    /// Optional override of the mood threshold bands.
    #[serde(default)]
    pub mood_bands: Option<Vec<MoodBandEntry>>
}

/// Toggles for optional README sections.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Features {
    /// Renders the weekly contributions section; only an explicit `false`
    /// disables it.
    #[serde(default = "enabled", deserialize_with = "enabled_unless_false")]
    pub weekly_contributions: bool
}

impl Default for Features {
    fn default() -> Self {
        Self {
            weekly_contributions: true
        }
    }
}

fn default_animal() -> String {
    DEFAULT_ANIMAL.to_owned()
}

fn enabled() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn animal_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|animal| !animal.trim().is_empty())
        .unwrap_or_else(default_animal))
}

fn enabled_unless_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>
{
    Ok(Option::<bool>::deserialize(deserializer)? != Some(false))
}

/// Validated settings derived from [`Config`] and the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Login used in every remote query.
    pub username:   String,
    /// Animal used to pick pet images.
    pub animal:     String,
    /// Language of the rendered section.
    pub locale:     Locale,
    /// Section toggles.
    pub features:   Features,
    /// Threshold bands used by the mood mapper.
    pub mood_bands: MoodBands
}

impl Config {
    /// Resolves the configuration into validated [`Settings`].
    ///
    /// `username_override` (typically `ZOOROFILE_USERNAME`) takes precedence
    /// over `github_username` when it is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when no valid GitHub login is available,
    /// the animal is not a lowercase slug, or the mood bands are invalid, and
    /// [`Error::UnknownMood`] when a band names an unsupported mood.
    pub fn resolve(&self, username_override: Option<&str>) -> Result<Settings, Error> {
        let username = username_override
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.github_username.trim());

        if username.is_empty() {
            return Err(Error::validation(
                "github_username must be configured or ZOOROFILE_USERNAME set"
            ));
        }
        if !matches_pattern(GITHUB_LOGIN_PATTERN, username)? {
            return Err(Error::validation(format!(
                "'{username}' is not a valid GitHub login"
            )));
        }

        let animal = match self.animal.trim() {
            "" => DEFAULT_ANIMAL,
            animal => animal
        };
        if !matches_pattern(ANIMAL_PATTERN, animal)? {
            return Err(Error::validation(format!(
                "animal '{animal}' must contain only lowercase letters, digits, '-' or '_'"
            )));
        }

        let mood_bands = match self.mood_bands.as_deref() {
            Some(entries) => MoodBands::from_entries(entries)?,
            None => MoodBands::default()
        };

        Ok(Settings {
            username: username.to_owned(),
            animal: animal.to_owned(),
            locale: self.language,
            features: self.features,
            mood_bands
        })
    }
}

fn matches_pattern(pattern: &str, value: &str) -> Result<bool, Error> {
    let regex = Regex::new(pattern)
        .map_err(|e| Error::validation(format!("invalid regex: {e}")))?;
    Ok(regex.is_match(value))
}

/// Loads the configuration file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, [`Error::Parse`] or
/// [`Error::Json`] when it cannot be decoded.
pub fn load_config(path: &Path) -> Result<Config, Error> {
    let contents = fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    parse_config(&contents, is_yaml)
}

/// Parses configuration contents that were already read into memory.
///
/// # Errors
///
/// Propagates decoding errors from serde_yaml or serde_json.
pub fn parse_config(contents: &str, yaml: bool) -> Result<Config, Error> {
    let config = if yaml {
        serde_yaml::from_str(contents)?
    } else {
        serde_json::from_str(contents)?
    };
    Ok(config)
}
