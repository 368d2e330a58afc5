mod files;
mod subcommands;

use std::fmt::Write;

use cmdtree::{ArgDef, Command, Config, FileNode, OptionDef, Request, Stdin, Value};
use expect_test::Expect;

fn tree() -> Command {
    Command::new("tool")
        .options_from(cmdtree::standard_options(&Config::default()))
        .option(OptionDef::bool(&["verbose", "v"]))
        .option(OptionDef::int(&["timeout", "t"]))
        .subcommand(
            Command::new("cat").argument(ArgDef::file("path").required().variadic().stdin()),
        )
        .subcommand(Command::new("echo").argument(ArgDef::string("text").variadic().stdin()))
        .subcommand(
            Command::new("pin")
                .option(OptionDef::bool(&["progress", "p"]))
                .option(OptionDef::uint(&["count", "n"]).with_default(Value::Uint(1)))
                .subcommand(
                    Command::new("add")
                        .argument(ArgDef::string("cid").required())
                        .argument(ArgDef::string("rest").variadic()),
                ),
        )
        .subcommand(Command::new("git").external().argument(ArgDef::string("args").variadic()))
        .subcommand(
            Command::new("add")
                .argument(ArgDef::file("path").required().recursive().variadic().stdin()),
        )
        .subcommand(Command::new("get").argument(ArgDef::file("single").required()))
        .subcommand(
            Command::new("put")
                .argument(ArgDef::string("name"))
                .argument(ArgDef::file("source").required()),
        )
}

fn render(req: &Request<'_>) -> String {
    let mut buf = String::new();
    writeln!(buf, "path: {:?}", req.path).unwrap();
    buf.push_str("options:");
    for (name, value) in &req.options {
        write!(buf, " {name}={value}").unwrap();
    }
    buf.push('\n');
    writeln!(buf, "arguments: {:?}", req.arguments).unwrap();
    for (key, node) in req.files.iter().flatten() {
        let kind = match node {
            FileNode::Stdin(it) => format!("stdin {}", it.name()),
            FileNode::File(_) => "file".to_string(),
            FileNode::Directory(_) => "dir".to_string(),
            FileNode::Web(url) => format!("web {url}"),
        };
        writeln!(buf, "file {key}: {kind}").unwrap();
    }
    buf
}

fn check(args: &str, expect: Expect) {
    check_with_stdin(args, None, expect)
}

fn check_with_stdin(args: &str, stdin: Option<Stdin>, expect: Expect) {
    let root = tree();
    let args = args.split_ascii_whitespace().collect::<Vec<_>>();
    match cmdtree::parse(&root, args, stdin) {
        Ok(req) => expect.assert_eq(&render(&req)),
        Err(failure) => expect.assert_eq(&failure.error.to_string()),
    }
}

/// A non-interactive stdin with `contents`.
fn stdin_with(contents: &str) -> Stdin {
    use std::io::{Seek, SeekFrom};

    let mut file = tempfile::tempfile().unwrap();
    std::io::Write::write_all(&mut file, contents.as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    Stdin::new(file, "/dev/stdin")
}
