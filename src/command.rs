use std::collections::BTreeMap;

use crate::{Error, OptionDef, Result};

/// A node of the command tree. The parser only reads it.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    description: String,
    subcommands: BTreeMap<String, Command>,
    arguments: Vec<ArgDef>,
    options: Vec<OptionDef>,
    external: bool,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Command {
        Command {
            name: name.into(),
            description: String::new(),
            subcommands: BTreeMap::new(),
            arguments: Vec::new(),
            options: Vec::new(),
            external: false,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Command {
        self.description = description.into();
        self
    }

    /// Adds `cmd` as a child, keyed by its name. A child with the same name
    /// is replaced.
    pub fn subcommand(mut self, cmd: Command) -> Command {
        self.subcommands.insert(cmd.name.clone(), cmd);
        self
    }

    pub fn argument(mut self, arg: ArgDef) -> Command {
        self.arguments.push(arg);
        self
    }

    pub fn option(mut self, opt: OptionDef) -> Command {
        self.options.push(opt);
        self
    }

    pub fn options_from(mut self, opts: impl IntoIterator<Item = OptionDef>) -> Command {
        self.options.extend(opts);
        self
    }

    /// Marks the command as a pass-through: every token after its name is
    /// handed over verbatim.
    pub fn external(mut self) -> Command {
        self.external = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn subcommands(&self) -> &BTreeMap<String, Command> {
        &self.subcommands
    }

    pub fn child(&self, name: &str) -> Option<&Command> {
        self.subcommands.get(name)
    }

    pub fn arguments(&self) -> &[ArgDef] {
        &self.arguments
    }

    pub fn options(&self) -> &[OptionDef] {
        &self.options
    }

    pub fn is_external(&self) -> bool {
        self.external
    }

    /// Follows `path` down from this command.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&Command> {
        path.iter().try_fold(self, |cmd, name| cmd.child(name.as_ref()))
    }

    /// Checks the argument slots: only the last one may be variadic or read
    /// standard input.
    pub fn check_arguments(&self) -> Result<()> {
        let last = self.arguments.len().saturating_sub(1);
        for (i, arg) in self.arguments.iter().enumerate() {
            if i == last {
                break;
            }
            if arg.variadic {
                return Err(Error::InvalidDefinition(format!(
                    "variadic argument \"{}\" must be the last one",
                    arg.name
                )));
            }
            if arg.supports_stdin {
                return Err(Error::InvalidDefinition(format!(
                    "argument \"{}\" reads stdin but is not the last one",
                    arg.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    String,
    File,
}

/// One positional slot of a command.
#[derive(Debug, Clone)]
pub struct ArgDef {
    pub name: String,
    pub kind: ArgKind,
    pub required: bool,
    pub variadic: bool,
    /// File slots only: directories are accepted.
    pub recursive: bool,
    pub supports_stdin: bool,
    pub description: String,
}

impl ArgDef {
    fn new(name: &str, kind: ArgKind) -> ArgDef {
        ArgDef {
            name: name.to_string(),
            kind,
            required: false,
            variadic: false,
            recursive: false,
            supports_stdin: false,
            description: String::new(),
        }
    }

    pub fn string(name: &str) -> ArgDef {
        ArgDef::new(name, ArgKind::String)
    }

    pub fn file(name: &str) -> ArgDef {
        ArgDef::new(name, ArgKind::File)
    }

    pub fn required(mut self) -> ArgDef {
        self.required = true;
        self
    }

    pub fn variadic(mut self) -> ArgDef {
        self.variadic = true;
        self
    }

    pub fn recursive(mut self) -> ArgDef {
        self.recursive = true;
        self
    }

    pub fn stdin(mut self) -> ArgDef {
        self.supports_stdin = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> ArgDef {
        self.description = description.into();
        self
    }
}
