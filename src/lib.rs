//! Turns raw command-line tokens into a resolved [`Request`] against a tree
//! of [`Command`]s.
//!
//! ```
//! use cmdtree::{ArgDef, Command, OptionDef};
//!
//! let root = Command::new("tool")
//!     .option(OptionDef::bool(&["verbose", "v"]))
//!     .subcommand(Command::new("cat").argument(ArgDef::string("name").required()));
//!
//! let req = cmdtree::parse(&root, ["-v", "cat", "foo"], None).unwrap();
//! assert_eq!(req.path, ["cat"]);
//! assert_eq!(req.arguments, ["foo"]);
//! assert!(req.bool_option("verbose"));
//! ```
//!
//! Grammar, in short: `--` ends option parsing, `--name[=value]` and
//! `-abc`/`-nVALUE`/`-n VALUE`/`-n=VALUE` are options, a word naming a child
//! of the current command descends into it, anything else is positional.
//! Positional tokens are then distributed over the command's argument slots;
//! file slots are resolved into [`FileNode`]s.

use std::{ffi::OsString, io};

mod args;
mod command;
mod config;
mod files;
mod options;
mod parse;
mod request;
mod stdin;

pub use crate::{
    command::{ArgDef, ArgKind, Command},
    config::Config,
    files::{Directory, FileNode, SerialFile, StdinFile},
    options::{standard_options, OptionDef, OptionTable, Value, ValueKind},
    parse::Parser,
    request::{ParseFailure, Request},
    stdin::{MessageReader, Stdin},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown option \"{0}\"")]
    UnknownOption(String),

    #[error("multiple values for option \"{0}\"")]
    DuplicateOption(String),

    #[error("missing argument for option \"{0}\"")]
    MissingValue(String),

    #[error("invalid value for option \"{option}\": {message}")]
    InvalidValue { option: String, message: String },

    #[error("option name \"{0}\" used multiple times")]
    AliasInUse(String),

    /// A typo, an early positional argument or too many arguments. The
    /// offending tokens are kept so a caller can compute suggestions.
    #[error("unknown command \"{}\"", .args.join(" "))]
    UnknownCommand { args: Vec<String> },

    #[error("invalid argument definition: {0}")]
    InvalidDefinition(String),

    #[error("invalid path '{path}', argument '{argument}' does not support directories")]
    DirectoryNotSupported { path: String, argument: String },

    #[error("'{path}' is a directory, use the '-{flag}' flag to specify directories")]
    NotRecursive { path: String, flag: String },

    #[error("argument \"{0}\" is required")]
    ArgumentRequired(String),

    #[error("standard input is not available")]
    StdinUnavailable,

    #[error("can't parse arguments, invalid utf8: {0:?}")]
    InvalidUtf8(OsString),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Parses `tokens` against `root` with the default [`Config`].
///
/// See [`Parser::parse`].
pub fn parse<'a, I, S>(
    root: &'a Command,
    tokens: I,
    stdin: Option<Stdin>,
) -> Result<Request<'a>, ParseFailure<'a>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Parser::new(root).parse(tokens, stdin)
}
