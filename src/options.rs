//! Option definitions, typed values and the per-path option table.

use std::{collections::HashMap, fmt};

use crate::{Command, Config, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Uint,
    Float,
    String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(it) => Some(it),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(it) => Some(it.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(it) => it.fmt(f),
            Value::Int(it) => it.fmt(f),
            Value::Uint(it) => it.fmt(f),
            Value::Float(it) => it.fmt(f),
            Value::String(it) => write!(f, "{it:?}"),
        }
    }
}

pub type ValueParser = fn(&str) -> Result<Value, String>;

/// A named option. The first alias is the canonical name: values given under
/// any alias are recorded under it. Every option has at least one name.
#[derive(Debug, Clone)]
pub struct OptionDef {
    names: Vec<String>,
    kind: ValueKind,
    description: String,
    default: Option<Value>,
    parser: Option<ValueParser>,
}

impl OptionDef {
    fn new(names: &[&str], kind: ValueKind) -> OptionDef {
        assert!(!names.is_empty(), "an option needs at least one name");
        OptionDef {
            names: names.iter().map(|it| it.to_string()).collect(),
            kind,
            description: String::new(),
            default: None,
            parser: None,
        }
    }

    /// A flag; given without a value it is `true`.
    ///
    /// # Panics
    ///
    /// This and the other kind constructors panic if `names` is empty.
    pub fn bool(names: &[&str]) -> OptionDef {
        OptionDef::new(names, ValueKind::Bool)
    }

    /// Panics if `names` is empty.
    pub fn int(names: &[&str]) -> OptionDef {
        OptionDef::new(names, ValueKind::Int)
    }

    /// Panics if `names` is empty.
    pub fn uint(names: &[&str]) -> OptionDef {
        OptionDef::new(names, ValueKind::Uint)
    }

    /// Panics if `names` is empty.
    pub fn float(names: &[&str]) -> OptionDef {
        OptionDef::new(names, ValueKind::Float)
    }

    /// Panics if `names` is empty.
    pub fn string(names: &[&str]) -> OptionDef {
        OptionDef::new(names, ValueKind::String)
    }

    pub fn describe(mut self, description: impl Into<String>) -> OptionDef {
        self.description = description.into();
        self
    }

    pub fn with_default(mut self, value: Value) -> OptionDef {
        self.default = Some(value);
        self
    }

    /// Replaces the built-in parser for this option's kind.
    pub fn with_parser(mut self, parser: ValueParser) -> OptionDef {
        self.parser = Some(parser);
        self
    }

    pub fn name(&self) -> &str {
        &self.names[0]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_bool(&self) -> bool {
        self.kind == ValueKind::Bool
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn parse(&self, raw: &str) -> Result<Value, String> {
        if let Some(parser) = self.parser {
            return parser(raw);
        }
        match self.kind {
            ValueKind::Bool => parse_bool(raw).map(Value::Bool),
            ValueKind::Int => raw.parse().map(Value::Int).map_err(|err| format!("{err}")),
            ValueKind::Uint => raw.parse().map(Value::Uint).map_err(|err| format!("{err}")),
            ValueKind::Float => raw.parse().map(Value::Float).map_err(|err| format!("{err}")),
            ValueKind::String => Ok(Value::String(raw.to_string())),
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("can't parse {raw:?} as a boolean")),
    }
}

/// The runtime options this crate interprets while resolving file arguments,
/// named after `config`.
pub fn standard_options(config: &Config) -> Vec<OptionDef> {
    vec![
        OptionDef::bool(&[config.recursive_option.as_str(), config.recursive_short.as_str()])
            .describe("Add directory paths recursively."),
        OptionDef::bool(&[config.dereference_option.as_str()])
            .describe("Symlinks supplied in arguments are dereferenced."),
        OptionDef::bool(&[config.hidden_option.as_str(), "H"])
            .describe("Include files that are hidden."),
        OptionDef::string(&[config.stdin_name_option.as_str()])
            .describe("Assign a name if the file source is stdin."),
    ]
}

/// Every option visible at one command path, keyed by each of its aliases.
#[derive(Debug)]
pub struct OptionTable<'a> {
    by_alias: HashMap<&'a str, &'a OptionDef>,
}

impl<'a> OptionTable<'a> {
    /// Collects the options of `root` and of every command along `path`.
    pub fn at(root: &'a Command, path: &[String]) -> Result<OptionTable<'a>> {
        let mut by_alias = HashMap::new();
        let mut cmd = root;
        let mut cmds = vec![root];
        for name in path {
            cmd = cmd
                .child(name)
                .ok_or_else(|| Error::UnknownCommand { args: path.to_vec() })?;
            cmds.push(cmd);
        }
        for cmd in cmds {
            for def in cmd.options() {
                for alias in def.names() {
                    if by_alias.insert(alias.as_str(), def).is_some() {
                        return Err(Error::AliasInUse(alias.clone()));
                    }
                }
            }
        }
        Ok(OptionTable { by_alias })
    }

    pub fn get(&self, alias: &str) -> Option<&'a OptionDef> {
        self.by_alias.get(alias).copied()
    }

    /// Every distinct definition in the table.
    pub fn defs(&self) -> impl Iterator<Item = &'a OptionDef> + '_ {
        let mut seen = Vec::new();
        self.by_alias.values().copied().filter(move |def| {
            if seen.iter().any(|it| std::ptr::eq(*it, *def)) {
                return false;
            }
            seen.push(*def);
            true
        })
    }

    /// Parses `raw` with the option `alias` resolves to.
    pub(crate) fn parse_value(&self, alias: &str, raw: &str) -> Result<(&'a OptionDef, Value)> {
        let def = self.get(alias).ok_or_else(|| Error::UnknownOption(alias.to_string()))?;
        let value = def
            .parse(raw)
            .map_err(|message| Error::InvalidValue { option: alias.to_string(), message })?;
        Ok((def, value))
    }
}
