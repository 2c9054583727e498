//! Single-level parsing and invocation.

use autoargs::{Annotation, AutoargsError, Coercion, Command, Parameter, Signature, Value};
use clap::error::ErrorKind;

fn join3() -> Command {
    Command::new(
        Signature::new("join3")
            .param(Parameter::positional("joiner"))
            .param(Parameter::positional("s1"))
            .param(Parameter::positional("s2"))
            .param(Parameter::positional("s3")),
        |args| {
            let parts = [args.arg(1).as_str()?, args.arg(2).as_str()?, args.arg(3).as_str()?];
            Ok(Value::from(parts.join(args.arg(0).as_str()?)))
        },
    )
}

fn my_sum() -> Command {
    Command::new(
        Signature::new("my_sum")
            .param(Parameter::positional("a").annotated(Coercion::int()))
            .param(Parameter::positional("b").annotated(Coercion::int()))
            .param(Parameter::positional("c").annotated(Coercion::int())),
        |args| {
            let mut total = 0;
            for value in &args.positional {
                total += value.as_int()?;
            }
            Ok(Value::Int(total))
        },
    )
}

fn product() -> Command {
    Command::new(
        Signature::new("product")
            .param(Parameter::var_positional("args").annotated(Coercion::float())),
        |args| {
            let mut total = 1.0;
            for value in &args.positional {
                total *= value.as_float()?;
            }
            Ok(Value::Float(total))
        },
    )
}

fn usage_kind(err: &AutoargsError) -> Option<ErrorKind> {
    match err {
        AutoargsError::Usage(e) => Some(e.kind()),
        _ => None,
    }
}

#[test]
fn test_join3_from_token_list() {
    let result = join3().call(["-", "a", "b", "cdef"]).unwrap();
    assert_eq!(result, Value::from("a-b-cdef"));
}

#[test]
fn test_join3_from_text() {
    let result = join3().call(", 1 2 3").unwrap();
    assert_eq!(result, Value::from("1,2,3"));
}

#[test]
fn test_join3_quoted_separator() {
    let result = join3().call("' + ' x y z").unwrap();
    assert_eq!(result, Value::from("x + y + z"));
}

#[test]
fn test_join3_insufficient_args() {
    let err = join3().call("insufficient args").unwrap_err();
    assert_eq!(
        usage_kind(&err),
        Some(ErrorKind::MissingRequiredArgument)
    );
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_my_sum_coerces_integers() {
    assert_eq!(my_sum().call("1 2 3").unwrap(), Value::Int(6));
}

#[test]
fn test_my_sum_negative_numbers_are_values() {
    assert_eq!(my_sum().call("-1 -2 10").unwrap(), Value::Int(7));
}

#[test]
fn test_my_sum_rejects_non_integers() {
    let err = my_sum().call(["a", "b", "c"]).unwrap_err();
    assert_eq!(usage_kind(&err), Some(ErrorKind::ValueValidation));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_product_of_floats() {
    assert_eq!(product().call("1 2 3 4").unwrap(), Value::Float(24.0));
    assert_eq!(product().call("1 2 3 4").unwrap().to_string(), "24.0");
}

#[test]
fn test_product_with_no_values() {
    assert_eq!(product().call("").unwrap(), Value::Float(1.0));
}

#[test]
fn test_unclosed_quote_is_a_tokenize_error() {
    let err = join3().call("- 'a b c").unwrap_err();
    assert!(matches!(err, AutoargsError::Tokenize(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_help_request_exits_zero() {
    let err = my_sum().call("--help").unwrap_err();
    assert_eq!(usage_kind(&err), Some(ErrorKind::DisplayHelp));
    assert_eq!(err.exit_code(), 0);
}

#[test]
fn test_help_mentions_type_names() {
    let err = my_sum().call("-h").unwrap_err();
    let AutoargsError::Usage(clap_err) = err else {
        panic!("expected a usage error");
    };
    let rendered = clap_err.render().to_string();
    assert!(rendered.contains("Usage: my_sum <a> <b> <c>"));
    assert!(rendered.contains("int"));
}

#[test]
fn test_keyword_only_choices() {
    let cmd = Command::new(
        Signature::new("pick").param(
            Parameter::keyword_only("op")
                .annotated(["sum", "mul"])
                .with_default("mul"),
        ),
        |args| Ok(args.keyword("op").cloned().unwrap_or_default()),
    );
    assert_eq!(cmd.call("").unwrap(), Value::from("mul"));
    assert_eq!(cmd.call("--op sum").unwrap(), Value::from("sum"));

    let err = cmd.call("--op div").unwrap_err();
    assert_eq!(usage_kind(&err), Some(ErrorKind::InvalidValue));
}

#[test]
fn test_fixed_arity_parameter() {
    let cmd = Command::new(
        Signature::new("point").param(Parameter::keyword_only("xy").annotated(2usize)),
        |args| Ok(args.keyword("xy").cloned().unwrap_or_default()),
    );
    assert_eq!(
        cmd.call("--xy 3 4").unwrap(),
        Value::List(vec![Value::from("3"), Value::from("4")])
    );
    assert!(cmd.call("--xy 3").is_err());
}

#[test]
fn test_variadic_keywords_are_rejected() {
    let cmd = Command::new(
        Signature::new("kw").param(Parameter::var_keyword("kwargs")),
        |_| Ok(Value::None),
    );
    let err = cmd.call("").unwrap_err();
    assert!(matches!(err, AutoargsError::UnsupportedParameterKind { .. }));
}

#[test]
fn test_ambiguous_positional_layout_is_an_error() {
    let cmd = Command::new(
        Signature::new("f")
            .param(Parameter::positional("xy").annotated(Annotation::Arity(2)))
            .param(Parameter::var_positional("rest")),
        |args| Ok(Value::List(args.positional)),
    );
    let err = cmd.call("1 2 3 4").unwrap_err();
    assert!(matches!(err, AutoargsError::InvalidSignature(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_zero_arity_is_an_error() {
    for param in [
        Parameter::keyword_only("n").annotated(Annotation::Arity(0)),
        Parameter::positional("p").annotated(Annotation::Arity(0)),
    ] {
        let cmd = Command::new(Signature::new("f").param(param), |_| Ok(Value::None));
        let err = cmd.call("").unwrap_err();
        assert!(matches!(err, AutoargsError::InvalidSignature(_)));
    }
}
