use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::parsing::name::NameBlocklist;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which entity recognizer heads the name-resolution chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecognizerBackend {
    #[default]
    Lexicon,
    /// No entity pass; names come from the textual patterns only.
    Noop,
}

impl std::str::FromStr for RecognizerBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexicon" => Ok(Self::Lexicon),
            "noop" | "none" => Ok(Self::Noop),
            other => {
                anyhow::bail!("Unknown recognizer backend '{other}' (expected lexicon or noop)")
            }
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub recognizer: RecognizerBackend,
    /// Overrides the built-in name blocklist when set.
    pub name_blocklist: Option<Vec<String>>,
    /// Given-name lexicon for the entity recognizer. Built-in list when unset.
    pub name_lexicon_path: Option<PathBuf>,
    pub batch_workers: Option<usize>,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            recognizer: RecognizerBackend::default(),
            name_blocklist: None,
            name_lexicon_path: None,
            batch_workers: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            recognizer: optional_env("RECOGNIZER")
                .map(|v| v.parse::<RecognizerBackend>())
                .transpose()
                .context("RECOGNIZER is invalid")?
                .unwrap_or_default(),
            name_blocklist: optional_env("NAME_BLOCKLIST").map(|v| parse_list(&v)),
            name_lexicon_path: optional_env("NAME_LEXICON_PATH").map(PathBuf::from),
            batch_workers: optional_env("BATCH_WORKERS")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("BATCH_WORKERS must be a positive integer")?,
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }

    pub fn blocklist(&self) -> NameBlocklist {
        match &self.name_blocklist {
            Some(entries) => NameBlocklist::new(entries.iter().cloned()),
            None => NameBlocklist::default(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_skips_empty() {
        assert_eq!(
            parse_list(" Java, Kotlin ,,Go "),
            vec!["Java".to_string(), "Kotlin".to_string(), "Go".to_string()]
        );
    }

    #[test]
    fn test_recognizer_backend_parsing() {
        assert_eq!("lexicon".parse::<RecognizerBackend>().unwrap(), RecognizerBackend::Lexicon);
        assert_eq!(" NOOP ".parse::<RecognizerBackend>().unwrap(), RecognizerBackend::Noop);
        assert!("spacy".parse::<RecognizerBackend>().is_err());
    }

    #[test]
    fn test_default_blocklist_when_unset() {
        let config = Config::default();
        assert_eq!(config.blocklist(), NameBlocklist::default());
    }

    #[test]
    fn test_blocklist_override_replaces_defaults() {
        let config = Config {
            name_blocklist: Some(vec!["Kotlin".to_string()]),
            ..Config::default()
        };
        let blocklist = config.blocklist();
        assert!(blocklist.contains("Kotlin"));
        assert!(!blocklist.contains("Python"));
    }
}
