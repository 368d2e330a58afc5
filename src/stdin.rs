//! Standard input handle and the notice printed before reading it from a
//! terminal.

use std::{
    fs::File,
    io::{self, Read, Write},
};

use crate::{Config, StdinFile};

/// A standard-input handle, together with the name it is reported under.
#[derive(Debug)]
pub struct Stdin {
    file: File,
    name: String,
}

impl Stdin {
    pub fn new(file: File, name: impl Into<String>) -> Stdin {
        Stdin { file, name: name.into() }
    }

    /// Duplicates the process' standard input.
    #[cfg(unix)]
    pub fn from_process() -> io::Result<Stdin> {
        use std::os::fd::AsFd;
        let fd = io::stdin().as_fd().try_clone_to_owned()?;
        Ok(Stdin::new(File::from(fd), "/dev/stdin"))
    }

    /// Duplicates the process' standard input.
    #[cfg(windows)]
    pub fn from_process() -> io::Result<Stdin> {
        use std::os::windows::io::AsHandle;
        let handle = io::stdin().as_handle().try_clone_to_owned()?;
        Ok(Stdin::new(File::from(handle), "CONIN$"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the handle is a character device, i.e. someone is expected to
    /// type the input.
    pub fn is_interactive(&self) -> io::Result<bool> {
        let meta = self.file.metadata()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            Ok(meta.file_type().is_char_device())
        }
        #[cfg(not(unix))]
        {
            use std::io::IsTerminal;
            let _ = meta;
            Ok(self.file.is_terminal())
        }
    }

    /// Turns the handle into a file node, wrapped in a [`MessageReader`]
    /// when it is interactive.
    pub(crate) fn into_file(self, config: &Config) -> io::Result<StdinFile> {
        self.into_file_with_sink(config, io::stderr())
    }

    fn into_file_with_sink<W>(self, config: &Config, sink: W) -> io::Result<StdinFile>
    where
        W: Write + Send + 'static,
    {
        let interactive = self.is_interactive().map_err(|err| {
            tracing::error!("can't stat {}: {err}", self.name);
            err
        })?;
        let Stdin { file, name } = self;
        let reader: Box<dyn Read + Send> = if interactive {
            tracing::debug!("{name} is a terminal, the first read prints a notice");
            Box::new(MessageReader::with_sink(file, config.stdin_notice(&name), sink))
        } else {
            Box::new(file)
        };
        Ok(StdinFile::new(name, reader))
    }
}

/// Prints `message` to the sink on the first read, then reads through.
pub struct MessageReader<R, W = io::Stderr> {
    inner: R,
    sink: W,
    message: String,
    done: bool,
}

impl<R: Read> MessageReader<R> {
    pub fn new(inner: R, message: String) -> MessageReader<R> {
        MessageReader::with_sink(inner, message, io::stderr())
    }
}

impl<R: Read, W: Write> MessageReader<R, W> {
    pub fn with_sink(inner: R, message: String, sink: W) -> MessageReader<R, W> {
        MessageReader { inner, sink, message, done: false }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read, W: Write> Read for MessageReader<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.done {
            self.done = true;
            writeln!(self.sink, "{}", self.message)?;
        }
        self.inner.read(buf)
    }
}
