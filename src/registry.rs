//! The dial registry: declarations, resolved values and typed access.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::dial::Dial;
use crate::error::{AccessError, DeclarationError, ResolveError};
use crate::kind::Kind;
use crate::resolver;
use crate::source::{Environment, ProcessEnvironment, Source};
use crate::tokenizer::FlagLookup;
use crate::value::Value;

/// A set of declared dials and their resolved values.
///
/// The registry has a two-phase lifecycle: dials are registered first, then
/// [`resolve`](Self::resolve) (or one of its variants) computes every dial's
/// value. It is not synchronized; finish registration and resolution before
/// sharing it across threads.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use dials::{Dial, Kind, Registry};
///
/// let mut registry = Registry::new();
/// registry.register(Dial::new("verbose", Kind::Bool).with_shorthand('v'))?;
/// registry.register(Dial::new("name", Kind::String).with_default("world"))?;
///
/// let env: HashMap<String, String> = HashMap::new();
/// let args = ["app", "-v", "input.txt"];
/// registry.resolve_with(Some(&args[..]), &env)?;
///
/// assert!(registry.bool_value("verbose")?);
/// assert_eq!(registry.string_value("name")?, "world");
/// assert_eq!(registry.positionals(), ["input.txt"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    dials: Vec<Dial>,
    index: HashMap<String, usize>,
    shorthands: HashMap<char, String>,
    values: HashMap<String, Value>,
    sources: HashMap<String, Source>,
    positionals: Vec<String>,
    config_files: Vec<PathBuf>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers a dial, seeding its value with the default.
    ///
    /// `bool` dials always start as `false`, whatever default was declared.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration is invalid, or if its name or
    /// shorthand is already taken. The registry is unchanged on error.
    pub fn register(&mut self, mut dial: Dial) -> Result<(), DeclarationError> {
        let initial = dial.validate()?;

        if let Some(shorthand) = dial.shorthand {
            if let Some(existing) = self.shorthands.get(&shorthand) {
                if *existing != dial.name {
                    return Err(DeclarationError::DuplicateShorthand {
                        shorthand,
                        existing: existing.clone(),
                    });
                }
            }
        }

        if self.index.contains_key(&dial.name) {
            return Err(DeclarationError::DuplicateName(dial.name));
        }

        tracing::debug!(
            dial = %dial.name,
            kind = %dial.kind,
            shorthand = ?dial.shorthand,
            "Registered dial"
        );

        dial.default = Some(initial.clone());
        if let Some(shorthand) = dial.shorthand {
            self.shorthands.insert(shorthand, dial.name.clone());
        }
        self.values.insert(dial.name.clone(), initial);
        self.sources.insert(dial.name.clone(), Source::Default);
        self.index.insert(dial.name.clone(), self.dials.len());
        self.dials.push(dial);

        Ok(())
    }

    /// Adds a JSON config file to consult during resolution.
    ///
    /// Files added later take precedence over earlier ones. The file is not
    /// read until resolution.
    pub fn add_config_file(&mut self, path: impl Into<PathBuf>) {
        self.config_files.push(path.into());
    }

    /// Resolves every dial from config files and the process environment.
    ///
    /// Command-line arguments are not consulted.
    ///
    /// # Errors
    ///
    /// See [`resolve_with`](Self::resolve_with).
    pub fn resolve(&mut self) -> Result<(), ResolveError> {
        self.resolve_with(None::<&[&str]>, &ProcessEnvironment)
    }

    /// Resolves every dial from `args`, the process environment and config files.
    ///
    /// `args[0]` is the program name and is skipped.
    ///
    /// # Errors
    ///
    /// See [`resolve_with`](Self::resolve_with).
    pub fn resolve_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<(), ResolveError> {
        self.resolve_with(Some(args), &ProcessEnvironment)
    }

    /// Resolves every dial from scratch.
    ///
    /// Precedence from highest to lowest: `args` (when given), `env`, config
    /// files (last added first), defaults. Positional arguments are rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed, the
    /// arguments contain an unknown or malformed flag, or any source supplies
    /// a value that does not convert to its dial's kind. On error the values
    /// and positionals from the previous resolution are kept.
    pub fn resolve_with<S: AsRef<str>>(
        &mut self,
        args: Option<&[S]>,
        env: &impl Environment,
    ) -> Result<(), ResolveError> {
        let resolved = resolver::resolve(self, args, env)?;

        self.values = resolved.values;
        self.sources = resolved.sources;
        self.positionals = resolved.positionals;

        Ok(())
    }

    /// All registered dials in registration order.
    #[must_use]
    pub fn dials(&self) -> &[Dial] {
        &self.dials
    }

    /// Returns the dial called `name`.
    #[must_use]
    pub fn dial(&self, name: &str) -> Option<&Dial> {
        self.index.get(name).map(|&i| &self.dials[i])
    }

    /// Config files in the order they were added.
    #[must_use]
    pub fn config_files(&self) -> &[PathBuf] {
        &self.config_files
    }

    /// Non-flag arguments from the most recent resolution.
    #[must_use]
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Returns where the current value of `name` came from.
    #[must_use]
    pub fn source(&self, name: &str) -> Option<&Source> {
        self.sources.get(name)
    }

    /// Returns the current value of `name`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns all current values as a JSON object keyed by dial name.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented as JSON.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        let values: BTreeMap<&str, &Value> = self
            .values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        serde_json::to_value(values)
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: Kind,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, AccessError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| AccessError::UnknownDial(name.to_string()))?;

        extract(value).ok_or_else(|| AccessError::KindMismatch {
            name: name.to_string(),
            expected,
            actual: value.kind(),
        })
    }

    /// Returns the value of a `bool` dial.
    ///
    /// # Errors
    ///
    /// Returns an error if the dial is unknown or not a `bool`.
    pub fn bool_value(&self, name: &str) -> Result<bool, AccessError> {
        self.typed(name, Kind::Bool, |value| match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        })
    }

    /// Returns the value of a `string` dial.
    ///
    /// # Errors
    ///
    /// Returns an error if the dial is unknown or not a `string`.
    pub fn string_value(&self, name: &str) -> Result<&str, AccessError> {
        self.typed(name, Kind::String, |value| match value {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Returns the value of an `int` dial.
    ///
    /// # Errors
    ///
    /// Returns an error if the dial is unknown or not an `int`.
    pub fn int_value(&self, name: &str) -> Result<i64, AccessError> {
        self.typed(name, Kind::Int, |value| match value {
            Value::Int(i) => Some(*i),
            _ => None,
        })
    }

    /// Returns the value of a `float` dial.
    ///
    /// # Errors
    ///
    /// Returns an error if the dial is unknown or not a `float`.
    pub fn float_value(&self, name: &str) -> Result<f64, AccessError> {
        self.typed(name, Kind::Float, |value| match value {
            Value::Float(f) => Some(*f),
            _ => None,
        })
    }

    /// Returns the value of a `strings` dial.
    ///
    /// # Errors
    ///
    /// Returns an error if the dial is unknown or not `strings`.
    pub fn strings_value(&self, name: &str) -> Result<&[String], AccessError> {
        self.typed(name, Kind::Strings, |value| match value {
            Value::Strs(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    /// Returns the value of an `ints` dial.
    ///
    /// # Errors
    ///
    /// Returns an error if the dial is unknown or not `ints`.
    pub fn ints_value(&self, name: &str) -> Result<&[i64], AccessError> {
        self.typed(name, Kind::Ints, |value| match value {
            Value::Ints(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    /// Returns the value of a `floats` dial.
    ///
    /// # Errors
    ///
    /// Returns an error if the dial is unknown or not `floats`.
    pub fn floats_value(&self, name: &str) -> Result<&[f64], AccessError> {
        self.typed(name, Kind::Floats, |value| match value {
            Value::Floats(items) => Some(items.as_slice()),
            _ => None,
        })
    }
}

impl FlagLookup for Registry {
    fn kind_of(&self, name: &str) -> Option<Kind> {
        self.dial(name).map(|dial| dial.kind)
    }

    fn name_of(&self, shorthand: char) -> Option<&str> {
        self.shorthands.get(&shorthand).map(String::as_str)
    }
}
