//! Option parsing and command path resolution, interleaved in a single pass
//! over the tokens.

use crate::{
    args, Command, Config, Error, OptionDef, OptionTable, ParseFailure, Request, Result, Stdin,
    Value,
};

/// Parses command lines against one command tree.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    root: &'a Command,
    config: Config,
}

impl<'a> Parser<'a> {
    pub fn new(root: &'a Command) -> Parser<'a> {
        Parser { root, config: Config::default() }
    }

    pub fn config(mut self, config: Config) -> Parser<'a> {
        self.config = config;
        self
    }

    /// Resolves `tokens` (without the program name) into a request: the
    /// command path and options first, then option defaults, then the
    /// command's argument slots.
    ///
    /// On failure the request resolved so far comes back with the error.
    pub fn parse<I, S>(
        &self,
        tokens: I,
        stdin: Option<Stdin>,
    ) -> Result<Request<'a>, ParseFailure<'a>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens.into_iter().map(Into::into).collect::<Vec<String>>();
        let mut request = Request::new(self.root);
        match self.parse_into(&mut request, tokens, stdin) {
            Ok(()) => Ok(request),
            Err(error) => Err(ParseFailure { request, error }),
        }
    }

    /// Parses the arguments of the current process.
    pub fn parse_env(&self, stdin: Option<Stdin>) -> Result<Request<'a>, ParseFailure<'a>> {
        let mut tokens = Vec::new();
        for arg in std::env::args_os().skip(1) {
            match arg.into_string() {
                Ok(it) => tokens.push(it),
                Err(it) => {
                    return Err(ParseFailure {
                        request: Request::new(self.root),
                        error: Error::InvalidUtf8(it),
                    })
                }
            }
        }
        self.parse(tokens, stdin)
    }

    fn parse_into(
        &self,
        request: &mut Request<'a>,
        tokens: Vec<String>,
        stdin: Option<Stdin>,
    ) -> Result<()> {
        State::new(tokens).walk(self.root, request)?;
        request.fill_defaults()?;
        args::distribute(request, stdin, &self.config)
    }
}

/// The unconsumed tokens, last one first.
struct State {
    rargs: Vec<String>,
}

impl State {
    fn new(mut tokens: Vec<String>) -> State {
        tokens.reverse();
        State { rargs: tokens }
    }

    fn next(&mut self) -> Option<String> {
        self.rargs.pop()
    }

    fn next_value(&mut self, flag: &str) -> Result<String> {
        self.next().ok_or_else(|| Error::MissingValue(flag.to_string()))
    }

    /// Takes every remaining token, in order.
    fn rest(&mut self) -> impl Iterator<Item = String> + '_ {
        self.rargs.drain(..).rev()
    }

    fn walk<'a>(&mut self, root: &'a Command, request: &mut Request<'a>) -> Result<()> {
        let mut table = OptionTable::at(root, &[])?;

        while let Some(arg) = self.next() {
            tracing::trace!("token {arg:?}");
            if arg == "--" {
                request.arguments.extend(self.rest());
                break;
            }

            if let Some(flag) = arg.strip_prefix("--") {
                let (def, value) = self.long_opt(flag, &table)?;
                record(request, def, value)?;
                continue;
            }

            if arg.len() > 1 && arg.starts_with('-') {
                for (def, value) in self.short_opts(&arg[1..], &table)? {
                    record(request, def, value)?;
                }
                continue;
            }

            let current: &'a Command = request.command;
            match current.child(&arg) {
                Some(sub) => {
                    tracing::debug!("entering subcommand {arg:?}");
                    request.command = sub;
                    request.path.push(arg);
                    table = OptionTable::at(root, &request.path)?;
                    if sub.is_external() {
                        tracing::debug!("{} is external, passing the rest through", sub.name());
                        request.arguments.extend(self.rest());
                        break;
                    }
                }
                None => {
                    request.arguments.push(arg);
                    if request.path.is_empty() {
                        return Err(Error::UnknownCommand { args: request.arguments.clone() });
                    }
                }
            }
        }
        Ok(())
    }

    /// `flag` is the token without its leading `--`.
    fn long_opt<'a>(
        &mut self,
        flag: &str,
        table: &OptionTable<'a>,
    ) -> Result<(&'a OptionDef, Value)> {
        if let Some((name, value)) = flag.split_once('=') {
            return table.parse_value(name, value);
        }
        let def = table.get(flag).ok_or_else(|| Error::UnknownOption(flag.to_string()))?;
        if def.is_bool() {
            return Ok((def, Value::Bool(true)));
        }
        let value = self.next_value(flag)?;
        table.parse_value(flag, &value)
    }

    /// `flags` is the token without its leading `-`: either `name=value` or
    /// a run of single-character flags, the last of which may take a value.
    fn short_opts<'a>(
        &mut self,
        flags: &str,
        table: &OptionTable<'a>,
    ) -> Result<Vec<(&'a OptionDef, Value)>> {
        if let Some((name, value)) = flags.split_once('=') {
            return Ok(vec![table.parse_value(name, value)?]);
        }

        let mut res = Vec::new();
        for (i, c) in flags.char_indices() {
            let end = i + c.len_utf8();
            let flag = &flags[i..end];
            let def = table.get(flag).ok_or_else(|| Error::UnknownOption(flag.to_string()))?;
            if def.is_bool() {
                res.push((def, Value::Bool(true)));
                continue;
            }

            let value = match &flags[end..] {
                "" => self.next_value(flag)?,
                rest => rest.to_string(),
            };
            res.push(table.parse_value(flag, &value)?);
            break;
        }
        Ok(res)
    }
}

/// Stores `value` under the canonical name of `def`. Each option may be set
/// once, whichever alias is used.
fn record(request: &mut Request<'_>, def: &OptionDef, value: Value) -> Result<()> {
    let name = def.name();
    if request.options.contains_key(name) {
        return Err(Error::DuplicateOption(name.to_string()));
    }
    request.options.insert(name.to_string(), value);
    Ok(())
}
