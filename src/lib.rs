//! Dials: a layered configuration registry.
//!
//! Declare typed settings ("dials") once, then resolve each one's effective
//! value from, in order of precedence:
//!
//! 1. **Command-line arguments** - `--name value`, `-n value`, clustered `-abc`
//! 2. **Environment variables** - dial `my-dial` reads `MY_DIAL`
//! 3. **JSON config files** - flat objects keyed by dial name; later files win
//! 4. **Declared defaults**
//!
//! This crate provides:
//! - Dial declarations and validation ([`Dial`], [`Kind`])
//! - The registry with typed accessors ([`Registry`])
//! - Typed values ([`Value`])
//! - Value sources ([`Environment`], [`ConfigFile`], [`Source`])
//! - The command-line scanner ([`tokenizer`])

mod dial;
mod error;
mod kind;
mod registry;
mod resolver;
mod source;
pub mod tokenizer;
mod value;

#[cfg(test)]
mod dial_tests;
#[cfg(test)]
mod tokenizer_tests;

pub use dial::{Dial, env_key, is_valid_name, is_valid_shorthand};
pub use error::{AccessError, DeclarationError, ParseError, ResolveError, ValueError};
pub use kind::Kind;
pub use registry::Registry;
pub use source::{ConfigFile, Environment, ProcessEnvironment, Source};
pub use value::Value;
