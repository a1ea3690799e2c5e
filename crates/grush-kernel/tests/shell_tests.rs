//! End-to-end tests: line in, value out, session semantics.

use grush_kernel::parser::parse_line;
use grush_kernel::store::{GraphStore, Post, StoreError, User};
use grush_kernel::{MemoryStore, Shell, ShellError};
use grush_types::Value;
use rstest::rstest;

fn shell() -> Shell<MemoryStore> {
    Shell::new(MemoryStore::new())
}

#[test]
fn set_then_variable_reference_round_trips() {
    let mut shell = shell();
    assert_eq!(shell.eval_line("set a 7").unwrap(), Value::Int(7));
    assert_eq!(shell.eval_line("echo $a").unwrap(), Value::Int(7));
    shell.eval_line("set a other").unwrap();
    assert_eq!(
        shell.eval_line("echo $a").unwrap(),
        Value::String("other".into())
    );
}

#[test]
fn placeholder_binds_to_previous_stage_not_first() {
    let mut shell = shell();
    shell.eval_line("create_user ana").unwrap();
    // Stage three sees stage two's string result, not stage one's record.
    let value = shell.eval_line("get_user u1 | field _ name | echo _").unwrap();
    assert_eq!(value, Value::String("ana".into()));
}

#[test]
fn pipe_threads_id_into_variable() {
    let mut shell = shell();
    shell
        .eval_line("create_user Bob | field _ id | set bob")
        .unwrap();
    assert_eq!(
        shell.eval_line("echo $bob").unwrap(),
        Value::String("u1".into())
    );
}

#[test]
fn implicit_pipe_binds_first_unbound_parameter() {
    let mut shell = shell();
    // `set u` takes the piped record as its value argument.
    shell.eval_line("create_user ana | set u").unwrap();
    match shell.eval_line("echo $u").unwrap() {
        Value::Record(record) => {
            assert_eq!(record.get("name"), Some(&Value::String("ana".into())));
        }
        other => panic!("expected record, got {other:?}"),
    }
}

#[test]
fn pending_binding_is_visible_later_in_the_same_line() {
    let mut shell = shell();
    assert_eq!(
        shell.eval_line("set a 5 | echo $a").unwrap(),
        Value::Int(5)
    );
}

#[test]
fn quoted_arguments_stay_atomic() {
    let mut shell = shell();
    shell.eval_line("create_user ana").unwrap();
    let value = shell
        .eval_line(r#"create_post u1 "a b" "c d" | field _ title"#)
        .unwrap();
    assert_eq!(value, Value::String("a b".into()));
}

#[test]
fn missing_required_argument_never_reaches_the_handler() {
    let mut shell = shell();
    let err = shell.eval_line("create_user").unwrap_err();
    assert!(
        matches!(err, ShellError::MissingArgument { ref param, .. } if param == "name"),
        "{err}"
    );
    assert!(shell.store().list_users().unwrap().is_empty());
}

#[rstest]
#[case("echo nope=1")]
#[case("get_user id=u1 nope=2")]
fn unknown_parameter_is_rejected(#[case] line: &str) {
    let err = shell().eval_line(line).unwrap_err();
    assert!(matches!(err, ShellError::UnknownParameter { .. }), "{err}");
}

#[test]
fn repeated_key_is_a_duplicate_binding() {
    let err = shell().eval_line("echo value=1 value=2").unwrap_err();
    assert!(matches!(err, ShellError::DuplicateBinding { .. }), "{err}");
}

#[test]
fn surplus_positional_after_named_is_a_duplicate_binding() {
    let err = shell().eval_line("echo value=1 2").unwrap_err();
    assert!(matches!(err, ShellError::DuplicateBinding { .. }), "{err}");
}

#[test]
fn surplus_positional_without_named_is_unexpected() {
    let err = shell().eval_line("vars 1").unwrap_err();
    assert!(matches!(err, ShellError::UnexpectedArgument { .. }), "{err}");
}

#[test]
fn unknown_command_leaves_the_value_store_untouched() {
    let mut shell = shell();
    shell.eval_line("set a 1").unwrap();
    let err = shell.eval_line("unknown_cmd x").unwrap_err();
    assert!(matches!(err, ShellError::UnknownCommand(_)), "{err}");
    assert_eq!(shell.session().get_var("a"), Some(&Value::Int(1)));
    assert_eq!(shell.session().last_result(), &Value::Int(1));
}

#[test]
fn failed_line_discards_pending_set_bindings() {
    let mut shell = shell();
    shell.eval_line("set keep 1").unwrap();
    // The set stage succeeds, then field fails on a non-record.
    let err = shell.eval_line("set a 2 | field _ nope").unwrap_err();
    assert!(matches!(err, ShellError::Command(_)), "{err}");
    assert_eq!(shell.session().get_var("a"), None);
    assert_eq!(shell.session().get_var("keep"), Some(&Value::Int(1)));
    assert_eq!(shell.session().last_result(), &Value::Int(1));
}

#[test]
fn placeholder_in_first_stage_has_no_input() {
    let err = shell().eval_line("echo _").unwrap_err();
    assert!(matches!(err, ShellError::NoPipedValue), "{err}");
}

#[test]
fn single_stage_matches_direct_invocation() {
    let mut shell = shell();
    assert_eq!(shell.eval_line("echo 7").unwrap(), Value::Int(7));
    assert_eq!(shell.session().last_result(), &Value::Int(7));
}

#[test]
fn parse_reserialize_preserves_quoted_boundaries() {
    let pipeline = parse_line(r#"create_post u1 "a b" "c d" | field _ title"#).unwrap();
    let reparsed = parse_line(&pipeline.to_string()).unwrap();
    assert_eq!(pipeline, reparsed);
}

#[test]
fn backslash_in_string_survives_reserialization() {
    // Only the quote character is escaped, so a literal backslash must
    // not multiply across print/parse cycles.
    let pipeline = parse_line(r#"echo "a\nb""#).unwrap();
    let printed = pipeline.to_string();
    assert_eq!(printed, r#"echo "a\nb""#);
    assert_eq!(parse_line(&printed).unwrap(), pipeline);
}

#[test]
fn float_literal_survives_reserialization() {
    // A whole float must not re-lex as an int.
    let pipeline = parse_line("echo 3.0").unwrap();
    let printed = pipeline.to_string();
    assert_eq!(printed, "echo 3.0");
    assert_eq!(parse_line(&printed).unwrap(), pipeline);
}

#[test]
fn piped_value_with_no_free_parameter_is_an_error() {
    let mut shell = shell();
    let err = shell.eval_line("echo 1 | vars").unwrap_err();
    assert!(matches!(err, ShellError::UnexpectedArgument { .. }), "{err}");
}

#[test]
fn login_enables_the_me_shortcut() {
    let mut shell = shell();
    shell.eval_line("create_user ana").unwrap();
    shell.eval_line("login name=ana").unwrap();
    let value = shell
        .eval_line(r#"create_post me hello "first post" | field _ author"#)
        .unwrap();
    assert_eq!(value, Value::String("ana".into()));
    shell.eval_line("logout").unwrap();
    let err = shell.eval_line("view_posts_of").unwrap_err();
    assert!(matches!(err, ShellError::Command(_)), "{err}");
}

#[test]
fn help_lists_registered_commands() {
    let mut shell = shell();
    match shell.eval_line("help").unwrap() {
        Value::String(text) => {
            assert!(text.contains("create_user(name: string)"), "{text}");
            assert!(text.contains("set(name: string, value: any)"), "{text}");
        }
        other => panic!("expected string, got {other:?}"),
    }
    match shell.eval_line("help like").unwrap() {
        Value::String(text) => assert!(text.contains("postid: string"), "{text}"),
        other => panic!("expected string, got {other:?}"),
    }
    let err = shell.eval_line("help nonsense").unwrap_err();
    assert!(err.to_string().contains("unknown command"), "{err}");
}

/// A store that panics on any call, to prove evaluation failures happen
/// before the collaborator is touched.
struct UntouchableStore;

macro_rules! untouchable {
    ($($name:ident(&self $(,$arg:ident: $ty:ty)*) -> $ret:ty;)*) => {
        $(fn $name(&self $(,$arg: $ty)*) -> $ret { panic!("store must not be called") })*
    };
    (mut $($name:ident(&mut self $(,$arg:ident: $ty:ty)*) -> $ret:ty;)*) => {
        $(fn $name(&mut self $(,$arg: $ty)*) -> $ret { panic!("store must not be called") })*
    };
}

impl GraphStore for UntouchableStore {
    untouchable! {
        get_user(&self, _id: &str) -> Result<User, StoreError>;
        get_user_by_name(&self, _name: &str) -> Result<User, StoreError>;
        list_users(&self) -> Result<Vec<User>, StoreError>;
        get_post(&self, _id: &str) -> Result<Post, StoreError>;
        list_posts(&self) -> Result<Vec<Post>, StoreError>;
        posts_of(&self, _author_id: &str) -> Result<Vec<Post>, StoreError>;
        likes_of(&self, _post_id: &str) -> Result<Vec<User>, StoreError>;
        liked_by(&self, _user_id: &str) -> Result<Vec<Post>, StoreError>;
        follows_of(&self, _user_id: &str) -> Result<Vec<User>, StoreError>;
        followers_of(&self, _user_id: &str) -> Result<Vec<User>, StoreError>;
    }
    untouchable! { mut
        create_user(&mut self, _name: &str) -> Result<User, StoreError>;
        update_user(&mut self, _id: &str, _name: &str) -> Result<User, StoreError>;
        delete_user(&mut self, _id: &str) -> Result<(), StoreError>;
        create_post(&mut self, _author_id: &str, _title: &str, _contents: &str) -> Result<Post, StoreError>;
        update_post(&mut self, _id: &str, _title: &str, _contents: &str) -> Result<Post, StoreError>;
        delete_post(&mut self, _id: &str) -> Result<(), StoreError>;
        add_like(&mut self, _user_id: &str, _post_id: &str) -> Result<(), StoreError>;
        add_follow(&mut self, _user_id: &str, _other_id: &str) -> Result<(), StoreError>;
    }
}

#[test]
fn undefined_variable_fails_before_any_store_call() {
    let mut shell = Shell::new(UntouchableStore);
    let err = shell.eval_line("view_posts_of $missing").unwrap_err();
    assert!(
        matches!(err, ShellError::UndefinedVariable(ref name) if name == "missing"),
        "{err}"
    );
}
