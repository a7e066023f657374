//! Error types for dial declaration, parsing, resolution and access.

use std::path::PathBuf;

use thiserror::Error;

use crate::kind::Kind;

/// Error returned by [`Registry::register`](crate::Registry::register).
///
/// A failed registration leaves the registry untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclarationError {
    /// Dial name is empty or does not match `^[a-z0-9][a-z0-9-]*$`.
    #[error("Invalid dial name '{0}': expected lowercase letters, digits and hyphens")]
    InvalidName(String),

    /// Value kind is not one of the recognized kinds.
    #[error("Unknown value kind '{0}': expected bool, string, int, float, strings, ints or floats")]
    UnknownKind(String),

    /// A non-bool dial was declared without a default value.
    #[error("Dial '{name}' of kind {kind} requires a default value")]
    MissingDefault {
        /// Name of the dial
        name: String,
        /// Declared kind
        kind: Kind,
    },

    /// The default value does not have the declared kind.
    #[error("Default value for dial '{name}' is {actual}, expected {expected}")]
    DefaultMismatch {
        /// Name of the dial
        name: String,
        /// Declared kind
        expected: Kind,
        /// Kind of the supplied default
        actual: Kind,
    },

    /// Shorthand is not a single ASCII alphanumeric character.
    #[error("Invalid shorthand '{shorthand}' for dial '{name}': expected one ASCII letter or digit")]
    InvalidShorthand {
        /// Name of the dial
        name: String,
        /// The rejected shorthand
        shorthand: char,
    },

    /// Shorthand is already claimed by another dial.
    #[error("Shorthand '{shorthand}' is already used by dial '{existing}'")]
    DuplicateShorthand {
        /// The contested shorthand
        shorthand: char,
        /// Dial that already owns it
        existing: String,
    },

    /// A dial with this name is already registered.
    #[error("Dial '{0}' is already registered")]
    DuplicateName(String),
}

/// Error produced while scanning command-line arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// `--name` does not name a registered dial.
    #[error("Unknown flag '--{0}'")]
    UnknownFlag(String),

    /// A shorthand character does not belong to any dial.
    #[error("Unknown shorthand '-{shorthand}' in '{token}'")]
    UnknownShorthand {
        /// The unknown character
        shorthand: char,
        /// The token it appeared in
        token: String,
    },

    /// A bare `-` token.
    #[error("Empty shorthand flag '-'")]
    EmptyShorthand,

    /// A value-taking shorthand appeared before the end of its cluster.
    #[error("Shorthand '-{shorthand}' in '{token}' takes a value and must be last in its group")]
    ShorthandNotLast {
        /// The value-taking shorthand
        shorthand: char,
        /// The token it appeared in
        token: String,
    },

    /// A value-taking flag was the last argument.
    #[error("Flag '{0}' requires a value")]
    MissingValue(String),
}

/// Error converting a raw string or JSON value into a typed dial value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    /// Not a base-10 integer.
    #[error("invalid integer '{0}'")]
    InvalidInt(String),

    /// Not a decimal floating point number.
    #[error("invalid float '{0}'")]
    InvalidFloat(String),

    /// Not `true` or `false`.
    #[error("invalid boolean '{0}': expected true or false")]
    InvalidBool(String),

    /// JSON value has a shape the kind cannot take.
    #[error("cannot use JSON {found} as {kind}")]
    Unsupported {
        /// Kind of the dial
        kind: Kind,
        /// JSON type that was found
        found: &'static str,
    },
}

/// Error returned by [`Registry::resolve`](crate::Registry::resolve).
///
/// Resolution is all-or-nothing: on error the previously resolved values stay in place.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Command-line arguments could not be scanned.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Failed to read a configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file as JSON.
    #[error("Failed to parse JSON config '{}': {source}", path.display())]
    JsonParse {
        /// Path to the config file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file is valid JSON but not an object.
    #[error("Config file '{}' must contain a JSON object", path.display())]
    NotAnObject {
        /// Path to the config file
        path: PathBuf,
    },

    /// A source supplied a value that could not be converted.
    #[error("Invalid value for dial '{name}' from {source_desc}: {error}")]
    InvalidValue {
        /// Name of the dial
        name: String,
        /// Human readable origin of the value
        source_desc: String,
        /// Conversion failure
        #[source]
        error: ValueError,
    },
}

/// Error returned by the typed accessors on [`Registry`](crate::Registry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// No dial with this name is registered.
    #[error("Unknown dial '{0}'")]
    UnknownDial(String),

    /// The dial holds a value of another kind.
    #[error("Dial '{name}' is {actual}, not {expected}")]
    KindMismatch {
        /// Name of the dial
        name: String,
        /// Kind requested by the caller
        expected: Kind,
        /// Kind the dial actually holds
        actual: Kind,
    },
}
