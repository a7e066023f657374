//! Dial declarations and their validation rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DeclarationError;
use crate::kind::Kind;
use crate::value::Value;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-z0-9][a-z0-9-]*$").unwrap_or_else(|e| unreachable!("invalid name pattern: {e}"))
});

/// Returns `true` if `name` is a valid dial name.
///
/// Valid names are non-empty and made of lowercase ASCII letters, digits and
/// hyphens, starting with a letter or digit.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Returns `true` if `c` can be used as a shorthand.
#[must_use]
pub const fn is_valid_shorthand(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Derives the environment variable consulted for a dial name.
///
/// # Example
///
/// ```
/// assert_eq!(dials::env_key("my-str"), "MY_STR");
/// ```
#[must_use]
pub fn env_key(name: &str) -> String {
    name.to_ascii_uppercase().replace('-', "_")
}

/// Declaration of a single named, typed setting.
///
/// Build one with [`Dial::new`] and the `with_*` methods, then hand it to
/// [`Registry::register`](crate::Registry::register).
///
/// # Example
///
/// ```
/// use dials::{Dial, Kind};
///
/// let dial = Dial::new("port", Kind::Int)
///     .with_shorthand('p')
///     .with_default(8080)
///     .with_description("Port to listen on");
/// assert_eq!(dial.env_key(), "PORT");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dial {
    /// Unique name, also the long flag and config file key
    pub name: String,

    /// Optional single-character alias for clustered `-abc` syntax
    pub shorthand: Option<char>,

    /// Kind of value the dial holds
    pub kind: Kind,

    /// Default value; ignored for `bool` dials, which always default to `false`
    pub default: Option<Value>,

    /// Free-form help text
    pub description: Option<String>,
}

impl Dial {
    /// Creates a dial declaration with no shorthand, default or description.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            shorthand: None,
            kind,
            default: None,
            description: None,
        }
    }

    /// Sets the shorthand character.
    #[must_use]
    pub const fn with_shorthand(mut self, shorthand: char) -> Self {
        self.shorthand = Some(shorthand);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the environment variable name for this dial.
    #[must_use]
    pub fn env_key(&self) -> String {
        env_key(&self.name)
    }

    /// Checks the declaration on its own and returns the value to seed it with.
    ///
    /// Uniqueness against other dials is the registry's concern.
    ///
    /// # Errors
    ///
    /// Returns the first rule the declaration breaks: name, default, then shorthand.
    pub fn validate(&self) -> Result<Value, DeclarationError> {
        if !is_valid_name(&self.name) {
            return Err(DeclarationError::InvalidName(self.name.clone()));
        }

        let initial = self.initial_value()?;

        if let Some(shorthand) = self.shorthand {
            if !is_valid_shorthand(shorthand) {
                return Err(DeclarationError::InvalidShorthand {
                    name: self.name.clone(),
                    shorthand,
                });
            }
        }

        Ok(initial)
    }

    /// Returns the value seeded at registration and restored before each resolution.
    fn initial_value(&self) -> Result<Value, DeclarationError> {
        if self.kind == Kind::Bool {
            return Ok(Value::Bool(false));
        }

        let default = self
            .default
            .as_ref()
            .ok_or_else(|| DeclarationError::MissingDefault {
                name: self.name.clone(),
                kind: self.kind,
            })?;

        if default.kind() != self.kind {
            return Err(DeclarationError::DefaultMismatch {
                name: self.name.clone(),
                expected: self.kind,
                actual: default.kind(),
            });
        }

        Ok(default.clone())
    }
}
