//! File arguments: what a path-like token resolves to.

use std::{
    env, fmt, fs,
    io::{self, Read},
    path::{Component, Path, PathBuf},
};

use url::Url;
use walkdir::WalkDir;

use crate::{ArgDef, Error, Result};

/// A handle to bytes a downstream consumer can read. Resolution itself only
/// takes metadata; contents are read later.
#[derive(Debug)]
pub enum FileNode {
    Stdin(StdinFile),
    File(SerialFile),
    Directory(Directory),
    /// Fetched by whoever consumes the request.
    Web(Url),
}

impl FileNode {
    pub fn is_dir(&self) -> bool {
        matches!(self, FileNode::Directory(_))
    }
}

pub struct StdinFile {
    name: String,
    reader: Box<dyn Read + Send>,
}

impl StdinFile {
    pub(crate) fn new(name: String, reader: Box<dyn Read + Send>) -> StdinFile {
        StdinFile { name, reader }
    }

    /// Name of the underlying handle, e.g. `/dev/stdin`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for StdinFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdinFile").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Read for StdinFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

/// A single filesystem entry, with the metadata seen at resolution time
/// (symlinks are not followed).
#[derive(Debug)]
pub struct SerialFile {
    path: PathBuf,
    metadata: fs::Metadata,
}

impl SerialFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    pub fn open(&self) -> io::Result<fs::File> {
        fs::File::open(&self.path)
    }
}

#[derive(Debug)]
pub struct Directory {
    path: PathBuf,
    metadata: fs::Metadata,
    hidden: bool,
}

impl Directory {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    pub fn includes_hidden(&self) -> bool {
        self.hidden
    }

    /// Walks the tree below this directory, in file name order. Dot-entries
    /// and everything under them are skipped unless hidden files were asked
    /// for.
    pub fn entries(&self) -> impl Iterator<Item = walkdir::Result<walkdir::DirEntry>> {
        let hidden = self.hidden;
        WalkDir::new(&self.path)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                entry.depth() == 0 || hidden || !is_hidden(entry.file_name())
            })
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|it| it.starts_with('.'))
}

/// Runtime flags the resolver honors, read from the request's options.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Policy<'a> {
    pub(crate) dereference: bool,
    pub(crate) recursive: bool,
    pub(crate) hidden: bool,
    pub(crate) recursive_short: &'a str,
}

/// Absolute `http` and `https` URLs with a host. The parser fills in a host
/// for forms like `http:foo` or `http:///etc`, so the authority is checked on
/// the raw token first.
pub(crate) fn as_url(raw: &str) -> Option<Url> {
    let (scheme, rest) = raw.split_once("://")?;
    if !(scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")) {
        return None;
    }
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    if host.is_empty() || host.starts_with(':') {
        return None;
    }
    let url = Url::parse(raw).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some_and(|it| !it.is_empty()) => Some(url),
        _ => None,
    }
}

/// Resolves a filesystem path for the slot `arg`. Returns the map key (the
/// base name) and the node.
pub(crate) fn resolve_path(
    raw: &str,
    arg: &ArgDef,
    policy: Policy<'_>,
) -> Result<(String, FileNode)> {
    let mut path = clean(raw);
    let is_cwd = path == Path::new(".");
    if is_cwd {
        path = env::current_dir()?;
    }
    if is_cwd || policy.dereference {
        path = fs::canonicalize(&path)?;
    }

    let metadata = fs::symlink_metadata(&path)?;
    let shown = to_slash(&path);
    tracing::debug!("resolved {raw:?} to {shown}");

    let node = if metadata.is_dir() {
        if !arg.recursive {
            return Err(Error::DirectoryNotSupported {
                path: shown,
                argument: arg.name.clone(),
            });
        }
        if !policy.recursive {
            return Err(Error::NotRecursive {
                path: shown,
                flag: policy.recursive_short.to_string(),
            });
        }
        FileNode::Directory(Directory { path: path.clone(), metadata, hidden: policy.hidden })
    } else {
        FileNode::File(SerialFile { path: path.clone(), metadata })
    };

    Ok((base_name(&path), node))
}

/// Lexical cleanup: drops `.` components, folds `..` into the preceding
/// normal component and removes duplicate separators. An empty result is
/// `.`.
fn clean(raw: &str) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in Path::new(raw).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

fn to_slash(path: &Path) -> String {
    let s = path.to_string_lossy();
    if cfg!(windows) {
        s.replace('\\', "/")
    } else {
        s.into_owned()
    }
}

fn base_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => to_slash(path),
    }
}
