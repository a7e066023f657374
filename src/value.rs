//! Typed dial values and conversion from raw sources.
//!
//! All string and JSON conversion lives here so the registry never inspects
//! raw source data itself.

use serde::Serialize;

use crate::error::ValueError;
use crate::kind::Kind;

/// A dial value, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `bool` value
    Bool(bool),
    /// `string` value
    Str(String),
    /// `int` value
    Int(i64),
    /// `float` value
    Float(f64),
    /// `strings` value
    Strs(Vec<String>),
    /// `ints` value
    Ints(Vec<i64>),
    /// `floats` value
    Floats(Vec<f64>),
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Bool(_) => Kind::Bool,
            Self::Str(_) => Kind::String,
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::Strs(_) => Kind::Strings,
            Self::Ints(_) => Kind::Ints,
            Self::Floats(_) => Kind::Floats,
        }
    }

    /// Converts a single raw string into a value of `kind`.
    ///
    /// List kinds produce a one-element list; the string is never split.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid literal for the kind.
    pub fn parse(kind: Kind, raw: &str) -> Result<Self, ValueError> {
        Ok(match kind {
            Kind::Bool => Self::Bool(parse_bool(raw)?),
            Kind::String => Self::Str(raw.to_string()),
            Kind::Int => Self::Int(parse_int(raw)?),
            Kind::Float => Self::Float(parse_float(raw)?),
            Kind::Strings => Self::Strs(vec![raw.to_string()]),
            Kind::Ints => Self::Ints(vec![parse_int(raw)?]),
            Kind::Floats => Self::Floats(vec![parse_float(raw)?]),
        })
    }

    /// Applies one more raw string to this value.
    ///
    /// Scalars are replaced, lists get the element appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid literal for the kind.
    /// The value is unchanged on error.
    pub fn push_str(&mut self, raw: &str) -> Result<(), ValueError> {
        match self {
            Self::Strs(items) => items.push(raw.to_string()),
            Self::Ints(items) => items.push(parse_int(raw)?),
            Self::Floats(items) => items.push(parse_float(raw)?),
            scalar => *scalar = Self::parse(scalar.kind(), raw)?,
        }
        Ok(())
    }

    /// Converts a JSON value from a config file into a value of `kind`.
    ///
    /// A scalar for a list kind becomes a one-element list; an array for a list
    /// kind is converted element by element.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON type does not fit the kind.
    pub fn from_json(kind: Kind, json: &serde_json::Value) -> Result<Self, ValueError> {
        if let (true, serde_json::Value::Array(items)) = (kind.is_list(), json) {
            return items.iter().try_fold(Self::empty(kind), |mut acc, item| {
                acc.extend(Self::from_json_scalar(kind, item)?);
                Ok(acc)
            });
        }

        Self::from_json_scalar(kind, json)
    }

    fn from_json_scalar(kind: Kind, json: &serde_json::Value) -> Result<Self, ValueError> {
        let unsupported = || ValueError::Unsupported {
            kind,
            found: json_type_name(json),
        };

        Ok(match (kind, json) {
            (Kind::Bool, serde_json::Value::Bool(b)) => Self::Bool(*b),
            (Kind::String, serde_json::Value::String(s)) => Self::Str(s.clone()),
            (Kind::Strings, serde_json::Value::String(s)) => Self::Strs(vec![s.clone()]),
            (Kind::Int | Kind::Ints, serde_json::Value::Number(n)) => {
                let int = n.as_i64().ok_or_else(|| ValueError::InvalidInt(n.to_string()))?;
                if kind.is_list() {
                    Self::Ints(vec![int])
                } else {
                    Self::Int(int)
                }
            }
            (Kind::Float | Kind::Floats, serde_json::Value::Number(n)) => {
                let float = n
                    .as_f64()
                    .ok_or_else(|| ValueError::InvalidFloat(n.to_string()))?;
                if kind.is_list() {
                    Self::Floats(vec![float])
                } else {
                    Self::Float(float)
                }
            }
            _ => return Err(unsupported()),
        })
    }

    /// Returns the zero value of `kind`: `false`, `""`, `0`, `0.0` or an empty list.
    #[must_use]
    pub const fn empty(kind: Kind) -> Self {
        match kind {
            Kind::Bool => Self::Bool(false),
            Kind::String => Self::Str(String::new()),
            Kind::Int => Self::Int(0),
            Kind::Float => Self::Float(0.0),
            Kind::Strings => Self::Strs(Vec::new()),
            Kind::Ints => Self::Ints(Vec::new()),
            Kind::Floats => Self::Floats(Vec::new()),
        }
    }

    /// Appends the elements of another list of the same kind.
    ///
    /// Scalars and mismatched kinds are replaced by `other`.
    fn extend(&mut self, other: Self) {
        match (self, other) {
            (Self::Strs(a), Self::Strs(b)) => a.extend(b),
            (Self::Ints(a), Self::Ints(b)) => a.extend(b),
            (Self::Floats(a), Self::Floats(b)) => a.extend(b),
            (this, other) => *this = other,
        }
    }
}

fn parse_int(raw: &str) -> Result<i64, ValueError> {
    raw.trim()
        .parse()
        .map_err(|_| ValueError::InvalidInt(raw.to_string()))
}

fn parse_float(raw: &str) -> Result<f64, ValueError> {
    raw.trim()
        .parse()
        .map_err(|_| ValueError::InvalidFloat(raw.to_string()))
}

fn parse_bool(raw: &str) -> Result<bool, ValueError> {
    raw.trim()
        .parse()
        .map_err(|_| ValueError::InvalidBool(raw.to_string()))
}

const fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::Strs(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Self::Strs(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Self::Ints(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Self::Floats(value)
    }
}
