use std::{env, fs};

use cmdtree::{Error, FileNode, Request};

use crate::tree;

fn parse<'a>(root: &'a cmdtree::Command, args: &[&str]) -> Result<Request<'a>, Error> {
    cmdtree::parse(root, args.iter().copied(), None).map_err(|failure| failure.error)
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(dir.path().join(".hidden"), "h").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("b.txt"), "b").unwrap();
    dir
}

fn names(node: &FileNode) -> Vec<String> {
    let FileNode::Directory(dir) = node else { panic!("not a directory: {node:?}") };
    dir.entries()
        .map(|entry| {
            let entry = entry.unwrap();
            let rel = entry.path().strip_prefix(dir.path()).unwrap();
            rel.to_string_lossy().replace('\\', "/")
        })
        .collect()
}

#[test]
fn regular_file() {
    let dir = fixture();
    let path = dir.path().join("a.txt");
    let root = tree();
    let req = parse(&root, &["get", path.to_str().unwrap()]).unwrap();
    let Some(FileNode::File(file)) = req.file("a.txt") else { panic!("{:?}", req.files) };
    assert!(file.metadata().is_file());
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "a");
}

#[test]
fn directories_need_a_recursive_slot() {
    let dir = fixture();
    let path = dir.path().to_str().unwrap();
    let root = tree();

    let err = parse(&root, &["get", path]).unwrap_err();
    assert!(matches!(err, Error::DirectoryNotSupported { .. }));
    assert!(err.to_string().ends_with("argument 'single' does not support directories"));

    let err = parse(&root, &["add", path]).unwrap_err();
    assert!(matches!(err, Error::NotRecursive { .. }));
    let msg = err.to_string();
    assert!(msg.ends_with("is a directory, use the '-r' flag to specify directories"), "{msg}");

    let req = parse(&root, &["add", "-r", path]).unwrap();
    let key = dir.path().file_name().unwrap().to_str().unwrap();
    let node = req.file(key).unwrap();
    assert!(node.is_dir());
    assert_eq!(names(node), ["a.txt", "sub", "sub/b.txt"]);

    let req = parse(&root, &["add", "-rH", path]).unwrap();
    assert_eq!(names(req.file(key).unwrap()), [".hidden", "a.txt", "sub", "sub/b.txt"]);
}

#[test]
fn current_dir_is_substituted() {
    let root = tree();
    let req = parse(&root, &["add", "--recursive", "."]).unwrap();
    let cwd = fs::canonicalize(env::current_dir().unwrap()).unwrap();
    let key = cwd.file_name().unwrap().to_str().unwrap();
    let Some(FileNode::Directory(dir)) = req.file(key) else { panic!("{:?}", req.files) };
    assert_eq!(dir.path(), cwd);
    assert!(dir.path().is_absolute());
}

#[test]
fn several_files() {
    let dir = fixture();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("sub").join("b.txt");
    let root = tree();
    let req = parse(&root, &["cat", a.to_str().unwrap(), b.to_str().unwrap()]).unwrap();
    let files = req.files.unwrap();
    assert_eq!(files.keys().collect::<Vec<_>>(), ["a.txt", "b.txt"]);
    assert!(req.arguments.is_empty());
}

#[test]
fn urls_are_not_touched() {
    let root = tree();
    let req = parse(&root, &["get", "https://example.com/data.bin"]).unwrap();
    let Some(FileNode::Web(url)) = req.file("https://example.com/data.bin") else {
        panic!("{:?}", req.files)
    };
    assert_eq!(url.host_str(), Some("example.com"));

    let err = parse(&root, &["get", "ftp://example.com/data.bin"]).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err}");
}

#[test]
fn missing_paths_are_io_errors() {
    let dir = fixture();
    let path = dir.path().join("nope");
    let root = tree();
    let err = parse(&root, &["get", path.to_str().unwrap()]).unwrap_err();
    match err {
        Error::Io(err) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
        err => panic!("unexpected error: {err}"),
    }
}

#[cfg(unix)]
#[test]
fn symlinks_are_dereferenced_on_request() {
    let dir = fixture();
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(dir.path().join("a.txt"), &link).unwrap();
    let link = link.to_str().unwrap();
    let root = tree();

    let req = parse(&root, &["get", link]).unwrap();
    let Some(FileNode::File(file)) = req.file("link") else { panic!("{:?}", req.files) };
    assert!(file.metadata().file_type().is_symlink());

    let req = parse(&root, &["--dereference-args", "get", link]).unwrap();
    let Some(FileNode::File(file)) = req.file("a.txt") else { panic!("{:?}", req.files) };
    assert!(file.metadata().is_file());
}
