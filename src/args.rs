//! Distribution of positional tokens over a command's argument slots.

use std::collections::{BTreeMap, VecDeque};

use crate::{
    files::{self, Policy},
    ArgDef, ArgKind, Config, Error, FileNode, Request, Result, Stdin,
};

/// Assigns `request.arguments` to the slots of `request.command`. String
/// slots end up in `request.arguments`, file slots in `request.files`.
///
/// Standard input counts as one more input when the last slot reads it.
/// Optional slots are skipped while the remaining inputs are only enough
/// for the remaining required slots.
pub(crate) fn distribute(
    request: &mut Request<'_>,
    mut stdin: Option<Stdin>,
    config: &Config,
) -> Result<()> {
    let command = request.command;
    command.check_arguments()?;
    let defs = command.arguments();

    let policy = Policy {
        dereference: request.bool_option(&config.dereference_option),
        recursive: request.bool_option(&config.recursive_option),
        hidden: request.bool_option(&config.hidden_option),
        recursive_short: &config.recursive_short,
    };
    let stdin_key = request
        .str_option(&config.stdin_name_option)
        .filter(|it| !it.is_empty())
        .unwrap_or(config.stdin_key.as_str())
        .to_string();

    let mut inputs: VecDeque<String> = request.arguments.iter().cloned().collect();
    let mut num_inputs = inputs.len();
    if defs.last().is_some_and(|it| it.supports_stdin) && stdin.is_some() {
        num_inputs += 1;
    }

    if !defs.last().is_some_and(|it| it.variadic) && inputs.len() > defs.len() {
        return Err(Error::UnknownCommand { args: inputs.into() });
    }

    let mut strings = Vec::with_capacity(num_inputs);
    let mut file_args = BTreeMap::new();

    let mut i_def = 0;
    let mut rem_required = defs.iter().filter(|it| it.required).count();

    for i_input in 0..num_inputs {
        let rem_inputs = num_inputs - i_input;

        let Some(mut def) = slot(defs, i_def) else { break };
        while rem_inputs <= rem_required && !def.required {
            i_def += 1;
            def = slot(defs, i_def).unwrap_or(def);
        }
        if def.required {
            rem_required = rem_required.saturating_sub(1);
        }

        let filling_variadic = i_def + 1 > defs.len();
        match def.kind {
            ArgKind::String => {
                if let Some(input) = inputs.pop_front() {
                    strings.push(input);
                } else if def.supports_stdin && !filling_variadic {
                    if let Some(handle) = stdin.take() {
                        let file = handle.into_file(config)?;
                        file_args.insert(config.stdin_key.clone(), FileNode::Stdin(file));
                    }
                }
            }
            ArgKind::File => {
                if let Some(input) = inputs.pop_front() {
                    let (key, node) = resolve(input, def, &mut stdin, &stdin_key, policy, config)?;
                    file_args.insert(key, node);
                } else if def.supports_stdin && def.required && !filling_variadic {
                    if let Some(handle) = stdin.take() {
                        let file = handle.into_file(config)?;
                        file_args.insert(stdin_key.clone(), FileNode::Stdin(file));
                    }
                }
            }
        }

        i_def += 1;
    }

    // The last slot reads stdin at run time; count it as present.
    if !defs.is_empty()
        && i_def == defs.len() - 1
        && stdin.is_some()
        && defs[i_def].supports_stdin
    {
        i_def += 1;
    }

    if let Some(missing) = defs.iter().skip(i_def).find(|it| it.required) {
        return Err(Error::ArgumentRequired(missing.name.clone()));
    }

    request.arguments = strings;
    if !file_args.is_empty() {
        request.files = Some(file_args);
    }
    Ok(())
}

/// The `i`-th slot; past the end, the last (variadic) one.
fn slot(defs: &[ArgDef], i: usize) -> Option<&ArgDef> {
    defs.get(i).or(defs.last())
}

/// Resolves one file token: `-` is standard input, `http(s)` URLs are web
/// files, anything else is a filesystem path.
fn resolve(
    input: String,
    def: &ArgDef,
    stdin: &mut Option<Stdin>,
    stdin_key: &str,
    policy: Policy<'_>,
    config: &Config,
) -> Result<(String, FileNode)> {
    if input == "-" {
        let handle = stdin.take().ok_or(Error::StdinUnavailable)?;
        tracing::debug!("reading {:?} from {}", def.name, handle.name());
        let file = handle.into_file(config)?;
        return Ok((stdin_key.to_string(), FileNode::Stdin(file)));
    }
    if let Some(url) = files::as_url(&input) {
        return Ok((input, FileNode::Web(url)));
    }
    files::resolve_path(&input, def, policy)
}
