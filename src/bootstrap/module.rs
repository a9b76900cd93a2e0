//! Loading diagnostic modules into an isolated namespace.
//!
//! A module is a YAML document:
//!
//! ```yaml
//! values:
//!   course: Streaming Data
//! functions:
//!   run_diagnostic:
//!     - print: "Checking your machine for ${course}"
//!     - collect: core
//!     - command: git --version
//! ```
//!
//! `values` and `functions` share one namespace. Text in `print` and
//! `command` steps may reference values with `${name}`; references are
//! resolved at load time against that namespace only.

use super::interpolation::resolve;
use crate::error::{DiagError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A built-in collector a module can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectorKind {
    Core,
    Env,
    Broker,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleDocument {
    #[serde(default)]
    values: BTreeMap<String, String>,
    #[serde(default)]
    functions: BTreeMap<String, Vec<RawStep>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawStep {
    Print { print: String },
    Collect { collect: CollectorKind },
    Command { command: String },
}

/// One resolved step of a module function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print a line on the host console.
    Print(String),
    /// Run a built-in collector.
    Collect(CollectorKind),
    /// Run a shell command line.
    Command(String),
}

/// A named entry in a module's namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Value(String),
    Function(Vec<Step>),
}

/// The host side of a module: everything a step can ask for.
pub trait ModuleHost {
    fn print(&mut self, text: &str);
    fn collect(&mut self, kind: CollectorKind) -> Result<()>;
    fn command(&mut self, command_line: &str) -> Result<()>;
}

/// A loaded module.
#[derive(Debug, Clone)]
pub struct RemoteModule {
    source_name: String,
    namespace: BTreeMap<String, Symbol>,
}

impl RemoteModule {
    /// Parse and validate module source.
    ///
    /// `source_name` (usually the URL) is used in error messages and logs.
    pub fn load(source_name: &str, source: &str) -> Result<Self> {
        let decode = |message: String| DiagError::DecodeFailure {
            source_name: source_name.to_string(),
            message,
        };

        let doc: ModuleDocument =
            serde_yaml::from_str(source).map_err(|e| decode(e.to_string()))?;

        let mut namespace = BTreeMap::new();
        for (name, value) in &doc.values {
            namespace.insert(name.clone(), Symbol::Value(value.clone()));
        }

        for (name, raw_steps) in doc.functions {
            if namespace.contains_key(&name) {
                return Err(decode(format!("'{}' is defined twice", name)));
            }
            let steps = raw_steps
                .into_iter()
                .map(|raw| resolve_step(raw, &doc.values))
                .collect::<std::result::Result<Vec<_>, String>>()
                .map_err(|missing| {
                    decode(format!("function '{}' references undefined '{}'", name, missing))
                })?;
            namespace.insert(name, Symbol::Function(steps));
        }

        tracing::debug!(
            "Loaded module from {} with {} symbols",
            source_name,
            namespace.len()
        );

        Ok(Self {
            source_name: source_name.to_string(),
            namespace,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Names declared by the module, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.namespace.keys().map(String::as_str)
    }

    /// Look up a symbol.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.namespace.get(name)
    }

    /// Look up a callable symbol. Values are not callable.
    pub fn entry_point(&self, name: &str) -> Option<EntryPoint<'_>> {
        match self.namespace.get_key_value(name)? {
            (name, Symbol::Function(steps)) => Some(EntryPoint { name, steps }),
            (_, Symbol::Value(_)) => None,
        }
    }

    /// Look up `name` and invoke it against `host`.
    pub fn invoke(&self, name: &str, host: &mut dyn ModuleHost) -> Result<()> {
        self.entry_point(name)
            .ok_or_else(|| DiagError::MissingEntryPoint {
                name: name.to_string(),
            })?
            .invoke(host)
    }
}

/// A callable looked up from a [`RemoteModule`].
#[derive(Debug, Clone, Copy)]
pub struct EntryPoint<'m> {
    name: &'m str,
    steps: &'m [Step],
}

impl EntryPoint<'_> {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn steps(&self) -> &[Step] {
        self.steps
    }

    /// Run every step in order, stopping at the first host error.
    pub fn invoke(&self, host: &mut dyn ModuleHost) -> Result<()> {
        tracing::debug!("Invoking '{}' ({} steps)", self.name, self.steps.len());
        for step in self.steps {
            match step {
                Step::Print(text) => host.print(text),
                Step::Collect(kind) => host.collect(*kind)?,
                Step::Command(line) => host.command(line)?,
            }
        }
        Ok(())
    }
}

fn resolve_step(
    raw: RawStep,
    values: &BTreeMap<String, String>,
) -> std::result::Result<Step, String> {
    Ok(match raw {
        RawStep::Print { print } => Step::Print(resolve(&print, values)?),
        RawStep::Collect { collect } => Step::Collect(collect),
        RawStep::Command { command } => Step::Command(resolve(&command, values)?),
    })
}
