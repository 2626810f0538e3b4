//! Runtime configuration read from the environment.

use std::path::PathBuf;

use library_api::{PagingPolicy, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::error::LibraryError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_DATA_FILE: &str = "library-data.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Absolute base that generated links are resolved against.
    pub base_url: String,
    pub paging: PagingPolicy,
    /// JSON file the in-memory repository is loaded from and saved to.
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            paging: PagingPolicy::default(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl Config {
    /// Reads `LIBRARY_BASE_URL`, `LIBRARY_DEFAULT_PAGE_SIZE`,
    /// `LIBRARY_MAX_PAGE_SIZE` and `LIBRARY_DATA_FILE`.
    pub fn from_env() -> Result<Self, LibraryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LibraryError> {
        let config = Self {
            base_url: lookup("LIBRARY_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            paging: PagingPolicy {
                default_page_size: env_u64(&lookup, "LIBRARY_DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE),
                max_page_size: env_u64(&lookup, "LIBRARY_MAX_PAGE_SIZE", MAX_PAGE_SIZE),
            },
            data_file: lookup("LIBRARY_DATA_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LibraryError> {
        if self.paging.max_page_size < self.paging.default_page_size {
            return Err(LibraryError::Config(format!(
                "max page size {} is smaller than default page size {}",
                self.paging.max_page_size, self.paging.default_page_size
            )));
        }
        Ok(())
    }
}

fn env_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(value) if value > 0 => value,
            _ => {
                tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("LIBRARY_BASE_URL", "https://books.example.com"),
            ("LIBRARY_DEFAULT_PAGE_SIZE", "5"),
            ("LIBRARY_MAX_PAGE_SIZE", "50"),
            ("LIBRARY_DATA_FILE", "/tmp/lib.json"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://books.example.com");
        assert_eq!(config.paging.default_page_size, 5);
        assert_eq!(config.paging.max_page_size, 50);
        assert_eq!(config.data_file, PathBuf::from("/tmp/lib.json"));
    }

    #[test]
    fn garbage_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("LIBRARY_DEFAULT_PAGE_SIZE", "ten"),
            ("LIBRARY_MAX_PAGE_SIZE", "0"),
        ]))
        .unwrap();
        assert_eq!(config.paging, PagingPolicy::default());
    }

    #[test]
    fn huge_max_page_size_still_honours_requested_size() {
        let config = Config::from_lookup(lookup(&[(
            "LIBRARY_MAX_PAGE_SIZE",
            "18446744073709551615",
        )]))
        .unwrap();
        let request = crate::paging::PageRequest::new(1, 5, &config.paging);
        assert_eq!(request.page_size, 5);
    }

    #[test]
    fn max_below_default_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("LIBRARY_DEFAULT_PAGE_SIZE", "30"),
            ("LIBRARY_MAX_PAGE_SIZE", "20"),
        ]))
        .unwrap_err();
        assert!(matches!(err, LibraryError::Config(_)));
    }
}
