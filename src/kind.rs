//! Value kinds a dial can be declared with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeclarationError;

/// The type of value a dial holds.
///
/// Plural kinds are ordered sequences of the matching scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Presence flag, `false` unless set
    Bool,
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Sequence of strings
    Strings,
    /// Sequence of integers
    Ints,
    /// Sequence of floats
    Floats,
}

impl Kind {
    /// All kinds in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Bool,
        Self::String,
        Self::Int,
        Self::Float,
        Self::Strings,
        Self::Ints,
        Self::Floats,
    ];

    /// Returns the name used in declarations and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Strings => "strings",
            Self::Ints => "ints",
            Self::Floats => "floats",
        }
    }

    /// Returns `true` for the sequence kinds.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::Strings | Self::Ints | Self::Floats)
    }

    /// Returns `true` if the kind takes a value on the command line.
    #[must_use]
    pub const fn takes_value(self) -> bool {
        !matches!(self, Self::Bool)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DeclarationError::UnknownKind(s.to_string()))
    }
}
