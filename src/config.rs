/// Names and texts the parser uses while resolving arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prefix of the notice printed before reading an interactive stdin.
    pub program: String,
    pub recursive_option: String,
    /// Short form of the recursive option, quoted in error messages.
    pub recursive_short: String,
    pub dereference_option: String,
    pub hidden_option: String,
    pub stdin_name_option: String,
    /// Key of stdin-backed file nodes when no stdin name was given.
    pub stdin_key: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            program: "cmdtree".to_string(),
            recursive_option: "recursive".to_string(),
            recursive_short: "r".to_string(),
            dereference_option: "dereference-args".to_string(),
            hidden_option: "hidden".to_string(),
            stdin_name_option: "stdin-name".to_string(),
            stdin_key: "stdin".to_string(),
        }
    }
}

impl Config {
    pub fn program(mut self, program: impl Into<String>) -> Config {
        self.program = program.into();
        self
    }

    /// The one-line notice shown on the first read of an interactive stdin.
    pub fn stdin_notice(&self, name: &str) -> String {
        let key = if cfg!(windows) { "Ctrl-z" } else { "Ctrl-d" };
        format!("{}: Reading from {name}; send {key} to stop.", self.program)
    }
}
