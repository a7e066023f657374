//! Precedence merge across defaults, config files, environment and command line.
//!
//! Sources are applied from lowest to highest precedence into a scratch copy
//! of the values, so the last write wins:
//!
//! 1. **Defaults** - seeded from each dial's declaration
//! 2. **Config files** - in the order they were added; later files override earlier ones
//! 3. **Environment** - `MY_DIAL` for dial `my-dial`
//! 4. **Command line** - only when arguments are supplied
//!
//! The registry adopts the scratch copy only if every step succeeds.

use std::collections::{HashMap, HashSet};

use crate::error::{ResolveError, ValueError};
use crate::registry::Registry;
use crate::source::{ConfigFile, Environment, Source};
use crate::tokenizer::{self, Assignment, CommandLine};
use crate::value::Value;

/// Outcome of a successful resolution pass.
#[derive(Debug, Default)]
pub(crate) struct Resolved {
    pub values: HashMap<String, Value>,
    pub sources: HashMap<String, Source>,
    pub positionals: Vec<String>,
}

/// Runs a full resolution pass over `registry` without modifying it.
pub(crate) fn resolve<S: AsRef<str>>(
    registry: &Registry,
    args: Option<&[S]>,
    env: &impl Environment,
) -> Result<Resolved, ResolveError> {
    let mut pass = Resolution::seeded(registry);

    for path in registry.config_files() {
        let file = ConfigFile::load(path)?;
        pass.apply_file(&file)?;
    }

    pass.apply_environment(env)?;

    if let Some(args) = args {
        let line = tokenizer::tokenize(args, registry)?;
        pass.apply_command_line(line)?;
    }

    for dial in registry.dials() {
        if let Some(source) = pass.resolved.sources.get(&dial.name) {
            tracing::debug!(dial = %dial.name, %source, "Resolved dial");
        }
    }

    Ok(pass.resolved)
}

struct Resolution<'r> {
    registry: &'r Registry,
    resolved: Resolved,
}

impl<'r> Resolution<'r> {
    fn seeded(registry: &'r Registry) -> Self {
        let mut resolved = Resolved::default();
        for dial in registry.dials() {
            let initial = dial
                .default
                .clone()
                .unwrap_or_else(|| Value::empty(dial.kind));
            resolved.values.insert(dial.name.clone(), initial);
            resolved.sources.insert(dial.name.clone(), Source::Default);
        }

        Self { registry, resolved }
    }

    fn set(&mut self, name: &str, value: Value, source: Source) {
        self.resolved.values.insert(name.to_string(), value);
        self.resolved.sources.insert(name.to_string(), source);
    }

    fn apply_file(&mut self, file: &ConfigFile) -> Result<(), ResolveError> {
        let source = Source::File(file.path().to_path_buf());

        for (key, json) in file.entries() {
            let Some(dial) = self.registry.dial(key) else {
                tracing::debug!(
                    key,
                    path = %file.path().display(),
                    "Ignoring config key with no matching dial"
                );
                continue;
            };

            let value = Value::from_json(dial.kind, json)
                .map_err(|e| invalid_value(key, &source, e))?;
            self.set(key, value, source.clone());
        }

        Ok(())
    }

    fn apply_environment(&mut self, env: &impl Environment) -> Result<(), ResolveError> {
        for dial in self.registry.dials() {
            let key = dial.env_key();
            let Some(raw) = env.var(&key) else {
                continue;
            };

            let source = Source::Environment(key);
            let value =
                Value::parse(dial.kind, &raw).map_err(|e| invalid_value(&dial.name, &source, e))?;
            self.set(&dial.name, value, source);
        }

        Ok(())
    }

    /// Applies flag occurrences in order.
    ///
    /// The first occurrence of a dial replaces whatever lower sources supplied;
    /// further occurrences of a list dial append.
    fn apply_command_line(&mut self, line: CommandLine) -> Result<(), ResolveError> {
        let mut seen = HashSet::new();

        for assignment in line.assignments {
            match assignment {
                Assignment::Switch(name) => {
                    self.set(&name, Value::Bool(true), Source::CommandLine);
                }
                Assignment::Value(name, raw) => {
                    let Some(dial) = self.registry.dial(&name) else {
                        continue;
                    };
                    let first = seen.insert(name.clone());
                    let value = match self.resolved.values.get(&name) {
                        Some(current) if !first => {
                            let mut next = current.clone();
                            next.push_str(&raw).map(|()| next)
                        }
                        _ => Value::parse(dial.kind, &raw),
                    }
                    .map_err(|e| invalid_value(&name, &Source::CommandLine, e))?;
                    self.set(&name, value, Source::CommandLine);
                }
            }
        }

        self.resolved.positionals = line.positionals;
        Ok(())
    }
}

fn invalid_value(name: &str, source: &Source, error: ValueError) -> ResolveError {
    ResolveError::InvalidValue {
        name: name.to_string(),
        source_desc: source.to_string(),
        error,
    }
}
