use std::collections::BTreeMap;

use crate::{Command, Error, FileNode, OptionTable, Result, Value};

/// The result of parsing: which command was invoked and with what.
#[derive(Debug)]
pub struct Request<'a> {
    pub root: &'a Command,
    pub command: &'a Command,
    /// Names of the subcommands taken from the root.
    pub path: Vec<String>,
    /// Keyed by canonical option name.
    pub options: BTreeMap<String, Value>,
    pub arguments: Vec<String>,
    /// Only set when at least one file argument was filled.
    pub files: Option<BTreeMap<String, FileNode>>,
}

impl<'a> Request<'a> {
    pub(crate) fn new(root: &'a Command) -> Request<'a> {
        Request {
            root,
            command: root,
            path: Vec::new(),
            options: BTreeMap::new(),
            arguments: Vec::new(),
            files: None,
        }
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// `false` when unset or not a boolean.
    pub fn bool_option(&self, name: &str) -> bool {
        self.option(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn str_option(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(Value::as_str)
    }

    /// Records `value` under `name`, replacing any earlier value.
    pub fn set_option(&mut self, name: impl Into<String>, value: Value) {
        self.options.insert(name.into(), value);
    }

    pub fn file(&self, key: &str) -> Option<&FileNode> {
        self.files.as_ref()?.get(key)
    }

    /// Gives every unset option visible at the request's path its default.
    pub fn fill_defaults(&mut self) -> Result<()> {
        let table = OptionTable::at(self.root, &self.path)?;
        for def in table.defs() {
            if self.options.contains_key(def.name()) {
                continue;
            }
            if let Some(value) = def.default_value() {
                self.options.insert(def.name().to_string(), value.clone());
            }
        }
        Ok(())
    }
}

/// A failed parse. `request` holds whatever was resolved before `error`.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct ParseFailure<'a> {
    pub request: Request<'a>,
    #[source]
    pub error: Error,
}
