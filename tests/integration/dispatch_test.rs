//! Multi-level dispatch through commands that return commands and tables.

use std::sync::Arc;

use autoargs::{
    recursive_call, AutoargsError, Coercion, Command, Dispatcher, Parameter, Signature, Table,
    Value,
};
use clap::error::ErrorKind;

fn aggregate(name: &str, op: &'static str) -> Command {
    Command::new(
        Signature::new(name)
            .param(Parameter::positional("x").annotated(Coercion::int()))
            .param(Parameter::positional("y").annotated(Coercion::int()))
            .param(Parameter::var_positional("z").annotated(Coercion::int())),
        move |args| {
            let mut values = Vec::new();
            for value in &args.positional {
                values.push(value.as_int()?);
            }
            Ok(Value::Int(match op {
                "sum" => values.iter().sum(),
                _ => values.iter().product(),
            }))
        },
    )
}

fn selector() -> Command {
    Command::new(
        Signature::new("f3").param(Parameter::keyword_only("op")),
        |args| {
            let op = args.keyword("op").cloned().unwrap_or_default();
            Ok(match op.as_str()? {
                "sum" => Value::from(aggregate("f1", "sum")),
                "mul" => Value::from(aggregate("f2", "mul")),
                _ => Value::None,
            })
        },
    )
}

fn echo() -> Command {
    Command::new(
        Signature::new("echo").param(Parameter::var_positional("words")),
        |args| Ok(Value::List(args.positional)),
    )
}

fn tool() -> Table {
    Table::new(Some("tool"))
        .doc("Test tool")
        .entry("f3", selector())
        .entry("echo", echo())
        .entry("sum", aggregate("sum", "sum"))
        .entry("version", "1.0")
}

#[test]
fn test_command_returning_command() {
    let result = recursive_call(selector(), "--op sum 1 2 3").unwrap();
    assert_eq!(result, Value::Int(6));

    let result = recursive_call(selector(), "--op mul 2 3 4").unwrap();
    assert_eq!(result, Value::Int(24));
}

#[test]
fn test_table_then_command_then_command() {
    let result = recursive_call(tool(), "f3 --op sum 1 2 3").unwrap();
    assert_eq!(result, Value::Int(6));
}

#[test]
fn test_nested_tables() {
    let outer = Table::new(Some("outer")).entry("inner", tool());
    let result = recursive_call(outer, "inner sum 4 5").unwrap();
    assert_eq!(result, Value::Int(9));
}

#[test]
fn test_stopping_early_returns_the_target() {
    let result = recursive_call(tool(), "f3").unwrap();
    assert!(matches!(result, Value::Target(_)));
    assert_eq!(result.to_string(), "<f3>");
}

#[test]
fn test_remaining_tokens_are_not_resplit() {
    let result = recursive_call(tool(), r#"echo 'a b' "c d" e"#).unwrap();
    assert_eq!(
        result,
        Value::List(vec![Value::from("a b"), Value::from("c d"), Value::from("e")])
    );
}

#[test]
fn test_remaining_tokens_fed_verbatim() {
    let tokens = vec!["echo".to_string(), "x y".to_string(), "'z'".to_string()];
    let result = recursive_call(tool(), tokens).unwrap();
    assert_eq!(
        result,
        Value::List(vec![Value::from("x y"), Value::from("'z'")])
    );
}

#[test]
fn test_selector_rejects_unknown_key() {
    let command = Arc::new(tool()).dispatcher(None);
    let err = command.call("nope").unwrap_err();
    assert!(matches!(
        err,
        AutoargsError::Usage(ref e) if e.kind() == ErrorKind::InvalidValue
    ));
}

#[test]
fn test_non_target_entries_are_not_selectable() {
    let table = tool();
    assert_eq!(table.selectable(), vec!["f3", "echo", "sum"]);

    let err = recursive_call(table, "version").unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_subset_limits_selection() {
    let table = tool().subset(["echo"]);
    assert!(recursive_call(table.clone(), "echo hi").is_ok());
    assert!(recursive_call(table, "sum 1 2").is_err());
}

#[test]
fn test_nested_level_named_after_selector_tokens() {
    let err = recursive_call(tool(), "sum 1 2 x").unwrap_err();
    let AutoargsError::NotDispatchable(message) = err else {
        panic!("expected a dispatch error");
    };
    assert!(message.contains("'tool sum'"), "{message}");
    assert!(message.contains("\"x\""), "{message}");
}

#[test]
fn test_nested_usage_error_shows_full_path() {
    let err = recursive_call(tool(), "f3 --op").unwrap_err();
    let AutoargsError::Usage(clap_err) = err else {
        panic!("expected a usage error");
    };
    assert_eq!(clap_err.kind(), ErrorKind::MissingRequiredArgument);
    assert!(clap_err.render().to_string().contains("Usage: tool f3"));
}

#[test]
fn test_explicit_root_name() {
    let err = Dispatcher::default()
        .recursive_call(tool(), "sum 1 2 x", Some("prog"))
        .unwrap_err();
    assert!(err.to_string().contains("'prog sum'"));
}

#[test]
fn test_empty_input_reports_missing_selection() {
    let err = recursive_call(tool(), "").unwrap_err();
    assert!(matches!(
        err,
        AutoargsError::Usage(ref e) if e.kind() == ErrorKind::MissingRequiredArgument
    ));
}

fn rendered_help(err: AutoargsError) -> String {
    let AutoargsError::Usage(clap_err) = err else {
        panic!("expected a help display");
    };
    assert_eq!(clap_err.kind(), ErrorKind::DisplayHelp);
    assert_eq!(clap_err.exit_code(), 0);
    clap_err.render().to_string()
}

#[test]
fn test_help_reaches_selected_command() {
    let help = rendered_help(recursive_call(tool(), "f3 --help").unwrap_err());
    assert!(help.contains("Usage: tool f3"), "{help}");
    assert!(!help.contains("<selection>"), "{help}");
}

#[test]
fn test_help_reaches_third_level() {
    let help = rendered_help(recursive_call(tool(), "f3 --op sum --help").unwrap_err());
    assert!(help.contains("Usage: tool f3 ['--op', 'sum']"), "{help}");
}

#[test]
fn test_help_after_leaf_arguments() {
    let help = rendered_help(recursive_call(tool(), "sum 1 2 3 --help").unwrap_err());
    assert!(help.contains("Usage: tool sum"), "{help}");
}

#[test]
fn test_help_at_root() {
    let help = rendered_help(recursive_call(tool(), "--help").unwrap_err());
    assert!(help.contains("Usage: tool <selection>"), "{help}");
}
