//! External value sources: environment variables and JSON config files.
//!
//! The environment is abstracted behind [`Environment`] so tests and embedders
//! can supply variables without touching the process environment.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;

/// Read access to environment variables.
pub trait Environment {
    /// Returns the value of `key`, or `None` if it is unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// Environment backed by the current process.
///
/// Variables that are not valid Unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: ::std::hash::BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Where a dial's effective value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Value declared at registration
    Default,
    /// Config file at this path
    File(PathBuf),
    /// Environment variable with this name
    Environment(String),
    /// Command-line arguments
    CommandLine,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::File(path) => write!(f, "config file '{}'", path.display()),
            Self::Environment(key) => write!(f, "environment variable {key}"),
            Self::CommandLine => f.write_str("command line"),
        }
    }
}

/// A parsed JSON config file: a flat object keyed by dial name.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    entries: serde_json::Map<String, serde_json::Value>,
}

impl ConfigFile {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not JSON, or is not a JSON object.
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let bytes = std::fs::read(path).map_err(|e| ResolveError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(path, &bytes)
    }

    /// Parses config file contents; `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a JSON object.
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self, ResolveError> {
        let json: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| ResolveError::JsonParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        match json {
            serde_json::Value::Object(entries) => Ok(Self {
                path: path.to_path_buf(),
                entries,
            }),
            _ => Err(ResolveError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Path this file was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the raw JSON value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    /// Iterates over all key/value pairs in the file.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}
