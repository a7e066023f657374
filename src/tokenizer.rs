//! Command-line scanning.
//!
//! Turns an argument vector into flag assignments and positional arguments.
//! Scanning only needs to know which names and shorthands exist and whether
//! they take a value; converting values is left to the caller.

use crate::error::ParseError;
use crate::kind::Kind;

/// Name and kind lookup used while scanning.
pub trait FlagLookup {
    /// Returns the kind of the dial called `name`.
    fn kind_of(&self, name: &str) -> Option<Kind>;

    /// Returns the name of the dial owning `shorthand`.
    fn name_of(&self, shorthand: char) -> Option<&str>;
}

/// A single flag occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// A bool flag was present
    Switch(String),
    /// A value-taking flag and the raw token that followed it
    Value(String, String),
}

impl Assignment {
    /// Name of the dial this assignment targets.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Switch(name) | Self::Value(name, _) => name,
        }
    }
}

/// Result of scanning an argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// Flag occurrences in encounter order
    pub assignments: Vec<Assignment>,
    /// Non-flag arguments in encounter order
    pub positionals: Vec<String>,
}

/// Scans `args`, skipping `args[0]` (the program name).
///
/// Stops at the first error.
///
/// # Errors
///
/// Returns an error for unknown flags or shorthands, a value-taking shorthand
/// that is not last in its group, a bare `-`, or a value-taking flag with no
/// following argument.
pub fn tokenize<S: AsRef<str>>(
    args: &[S],
    lookup: &impl FlagLookup,
) -> Result<CommandLine, ParseError> {
    let mut line = CommandLine::default();
    let mut tokens = args.iter().map(AsRef::as_ref).skip(1);

    while let Some(token) = tokens.next() {
        tracing::trace!(token, "Scanning argument");

        if let Some(name) = token.strip_prefix("--") {
            let kind = lookup
                .kind_of(name)
                .ok_or_else(|| ParseError::UnknownFlag(name.to_string()))?;
            line.assignments
                .push(assign(name, kind, format!("--{name}"), &mut tokens)?);
        } else if let Some(cluster) = token.strip_prefix('-') {
            scan_cluster(token, cluster, lookup, &mut tokens, &mut line)?;
        } else {
            line.positionals.push(token.to_string());
        }
    }

    Ok(line)
}

/// Scans the characters of a `-abc` group.
fn scan_cluster<'a>(
    token: &str,
    cluster: &str,
    lookup: &impl FlagLookup,
    tokens: &mut impl Iterator<Item = &'a str>,
    line: &mut CommandLine,
) -> Result<(), ParseError> {
    if cluster.is_empty() {
        return Err(ParseError::EmptyShorthand);
    }

    let mut chars = cluster.chars().peekable();
    while let Some(shorthand) = chars.next() {
        let name = lookup
            .name_of(shorthand)
            .ok_or_else(|| ParseError::UnknownShorthand {
                shorthand,
                token: token.to_string(),
            })?;
        let kind = lookup
            .kind_of(name)
            .ok_or_else(|| ParseError::UnknownShorthand {
                shorthand,
                token: token.to_string(),
            })?;

        if kind.takes_value() && chars.peek().is_some() {
            return Err(ParseError::ShorthandNotLast {
                shorthand,
                token: token.to_string(),
            });
        }

        line.assignments
            .push(assign(name, kind, format!("-{shorthand}"), tokens)?);
    }

    Ok(())
}

/// Builds the assignment for one flag, consuming its value token if it takes one.
fn assign<'a>(
    name: &str,
    kind: Kind,
    flag: String,
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<Assignment, ParseError> {
    if !kind.takes_value() {
        return Ok(Assignment::Switch(name.to_string()));
    }

    let value = tokens.next().ok_or(ParseError::MissingValue(flag))?;
    Ok(Assignment::Value(name.to_string(), value.to_string()))
}
