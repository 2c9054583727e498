//! Partial parsing and namespace conversion through the public parser API.

use autoargs::{
    build_parser, parse_tokens, to_call_arguments, Coercion, Parameter, ParserSpec, Signature,
    Value,
};
use clap::ColorChoice;
use pretty_assertions::assert_eq;

fn two_ints() -> Signature {
    Signature::new("pair")
        .param(Parameter::positional("a").annotated(Coercion::int()))
        .param(Parameter::positional("b").annotated(Coercion::int()))
}

fn words() -> Signature {
    Signature::new("words").param(Parameter::var_positional("rest"))
}

fn spec(signature: &Signature) -> ParserSpec {
    build_parser(signature, None, None).unwrap()
}

#[test]
fn test_remainder_is_not_reconsumed() {
    let first = parse_tokens("1 2 x y", &spec(&two_ints()), true, ColorChoice::Never).unwrap();
    assert_eq!(first.remaining, vec!["x", "y"]);

    let second = parse_tokens(
        first.remaining.clone(),
        &spec(&words()),
        true,
        ColorChoice::Never,
    )
    .unwrap();
    assert!(second.remaining.is_empty());
    assert_eq!(
        second.namespace.get("rest"),
        Some(&Value::List(vec![Value::from("x"), Value::from("y")]))
    );
    assert_eq!(first.namespace.get("a"), Some(&Value::Int(1)));
    assert_eq!(first.namespace.get("b"), Some(&Value::Int(2)));
}

#[test]
fn test_maximal_prefix_is_stable() {
    let parser = spec(&two_ints());
    let first = parse_tokens("1 2 3", &parser, true, ColorChoice::Never).unwrap();
    assert_eq!(first.remaining, vec!["3"]);

    let again = parse_tokens(vec!["1", "2"], &parser, true, ColorChoice::Never).unwrap();
    assert!(again.remaining.is_empty());
    assert_eq!(again.namespace, first.namespace);
}

#[test]
fn test_round_trip_preserves_order() {
    let signature = Signature::new("f")
        .param(Parameter::positional("x"))
        .param(Parameter::positional("y").annotated(Coercion::float()))
        .param(Parameter::positional("z").annotated(Coercion::int()));
    let parsed = parse_tokens(
        ["first", "2.5", "-3"],
        &spec(&signature),
        false,
        ColorChoice::Never,
    )
    .unwrap();

    let args = to_call_arguments(&signature, &parsed.namespace, true).unwrap();
    assert_eq!(
        args.positional,
        vec![Value::from("first"), Value::Float(2.5), Value::Int(-3)]
    );
    assert!(args.keyword.is_empty());
}

#[test]
fn test_variadic_tail_keeps_order() {
    let signature = Signature::new("product")
        .param(Parameter::var_positional("args").annotated(Coercion::float()));
    let parsed = parse_tokens("4 3 2 1 0.5", &spec(&signature), false, ColorChoice::Never).unwrap();
    let args = to_call_arguments(&signature, &parsed.namespace, true).unwrap();
    assert_eq!(
        args.positional,
        vec![
            Value::Float(4.0),
            Value::Float(3.0),
            Value::Float(2.0),
            Value::Float(1.0),
            Value::Float(0.5)
        ]
    );
}
