use cmdtree::Error;
use expect_test::expect;

use crate::{check, tree};

#[test]
fn subcommands() {
    check(
        "",
        expect![[r#"
            path: []
            options:
            arguments: []
        "#]],
    );
    check(
        "pin add abc",
        expect![[r#"
            path: ["pin", "add"]
            options: count=1
            arguments: ["abc"]
        "#]],
    );
    check(
        "-v pin -p add abc def ghi",
        expect![[r#"
            path: ["pin", "add"]
            options: count=1 progress=true verbose=true
            arguments: ["abc", "def", "ghi"]
        "#]],
    );
    check(
        "pin",
        expect![[r#"
            path: ["pin"]
            options: count=1
            arguments: []
        "#]],
    );
}

#[test]
fn double_dash_ends_parsing() {
    check(
        "pin add -- -v --progress add",
        expect![[r#"
            path: ["pin", "add"]
            options: count=1
            arguments: ["-v", "--progress", "add"]
        "#]],
    );
    check(
        "pin add abc -- --",
        expect![[r#"
            path: ["pin", "add"]
            options: count=1
            arguments: ["abc", "--"]
        "#]],
    );
}

#[test]
fn external_commands_get_the_rest_verbatim() {
    check(
        "-v git commit -m --amend -- pin",
        expect![[r#"
            path: ["git"]
            options: verbose=true
            arguments: ["commit", "-m", "--amend", "--", "pin"]
        "#]],
    );
}

#[test]
fn words_after_a_leaf_are_positional() {
    check(
        "pin add pin add",
        expect![[r#"
            path: ["pin", "add"]
            options: count=1
            arguments: ["pin", "add"]
        "#]],
    );
}

#[test]
fn unknown_commands() {
    check("pni add", expect![[r#"unknown command "pni""#]]);
    check("-v -", expect![[r#"unknown command "-""#]]);
    check("get a b", expect![[r#"unknown command "a b""#]]);
    check("pin extra", expect![[r#"unknown command "extra""#]]);
}

#[test]
fn unknown_command_keeps_the_context() {
    let root = tree();
    let failure = cmdtree::parse(&root, ["--verbose", "pni", "add"], None).unwrap_err();
    match &failure.error {
        Error::UnknownCommand { args } => assert_eq!(args, &["pni"]),
        err => panic!("unexpected error: {err}"),
    }
    assert!(std::ptr::eq(failure.request.root, &root));
    assert!(failure.request.path.is_empty());
    assert!(failure.request.bool_option("verbose"));
}

#[test]
fn failures_carry_the_partial_request() {
    let root = tree();
    let failure = cmdtree::parse(&root, ["pin", "add", "abc", "--nope"], None).unwrap_err();
    assert_eq!(failure.to_string(), r#"unknown option "nope""#);
    assert_eq!(failure.request.path, ["pin", "add"]);
    assert_eq!(failure.request.command.name(), "add");
    assert_eq!(failure.request.arguments, ["abc"]);
}
