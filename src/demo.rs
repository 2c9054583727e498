//! Built-in demo commands exposed by the `autoargs` binary.

use autoargs::{
    AutoargsError, CallArguments, Coercion, Command, Parameter, Result, Signature, Table, Value,
};

/// Returns the table of demo commands the binary dispatches into.
pub fn namespace() -> Table {
    Table::new(Some("autoargs"))
        .doc("Demo commands derived from their signatures")
        .entry("join3", join3())
        .entry("my_sum", my_sum())
        .entry("my_tuple", my_tuple())
        .entry("product", product())
        .entry("f1", f1())
        .entry("f2", f2())
        .entry("f3", f3())
        .entry("example", example())
}

/// `join3(joiner, s1, s2, s3)`: join three strings with a separator.
pub fn join3() -> Command {
    Command::new(
        Signature::new("join3")
            .doc("Join three strings with a separator")
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

/// `my_sum(a: int, b: int, c: int)`.
pub fn my_sum() -> Command {
    Command::new(
        Signature::new("my_sum")
            .doc("Add three integers")
            .param(Parameter::positional("a").annotated(Coercion::int()))
            .param(Parameter::positional("b").annotated(Coercion::int()))
            .param(Parameter::positional("c").annotated(Coercion::int())),
        |args| Ok(Value::Int(ints(&args.positional)?.iter().sum())),
    )
}

/// `my_tuple(a: int, b: float, c: complex)`: echo typed values back.
pub fn my_tuple() -> Command {
    Command::new(
        Signature::new("my_tuple")
            .doc("Return the coerced arguments as a list")
            .param(Parameter::positional("a").annotated(Coercion::int()))
            .param(Parameter::positional("b").annotated(Coercion::float()))
            .param(Parameter::positional("c").annotated(complex())),
        |args| Ok(Value::List(args.positional)),
    )
}

/// Parses `1+2j`-style complex numbers into a `[real, imag]` pair of floats.
pub fn complex() -> Coercion {
    Coercion::new("complex", |raw| {
        parse_complex(raw)
            .map(|(re, im)| Value::List(vec![Value::Float(re), Value::Float(im)]))
            .ok_or_else(|| format!("invalid complex value: '{raw}'"))
    })
}

fn parse_complex(raw: &str) -> Option<(f64, f64)> {
    let text = raw.trim();
    let text = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text)
        .trim();

    let Some(body) = text.strip_suffix(|c: char| c == 'j' || c == 'J') else {
        return Some((text.parse::<f64>().ok()?, 0.0));
    };

    // The sign that splits real from imaginary is not the one of an exponent.
    let split = body
        .char_indices()
        .filter(|&(i, c)| {
            i > 0 && (c == '+' || c == '-') && !body[..i].ends_with(|c: char| c == 'e' || c == 'E')
        })
        .map(|(i, _)| i)
        .last();

    let (re, im) = match split {
        Some(i) => (body[..i].parse::<f64>().ok()?, &body[i..]),
        None => (0.0, body),
    };
    let im = match im {
        "" | "+" => 1.0,
        "-" => -1.0,
        digits => digits.parse::<f64>().ok()?,
    };
    Some((re, im))
}

/// `product(*args: float)`.
pub fn product() -> Command {
    Command::new(
        Signature::new("product")
            .doc("Multiply any number of floats")
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

fn aggregate_signature(name: &str, doc: &str) -> Signature {
    Signature::new(name)
        .doc(doc)
        .param(Parameter::positional("x").annotated(Coercion::int()))
        .param(Parameter::positional("y").annotated(Coercion::int()))
        .param(Parameter::var_positional("z").annotated(Coercion::int()))
}

fn aggregate(args: &CallArguments, op: &str) -> Result<Value> {
    let values = ints(&args.positional)?;
    match op {
        "sum" => Ok(Value::Int(values.iter().sum())),
        "mul" => Ok(Value::Int(values.iter().product())),
        other => Err(AutoargsError::invocation(format!("unknown op '{other}'"))),
    }
}

/// `f1(x: int, y: int, *z: int)`: sum of all values.
pub fn f1() -> Command {
    Command::new(
        aggregate_signature("f1", "Aggregate x, y and z by sum"),
        |args| aggregate(&args, "sum"),
    )
}

/// `f2(x: int, y: int, *z: int, op: {sum, mul} = mul)`.
pub fn f2() -> Command {
    Command::new(
        aggregate_signature("f2", "Aggregate x, y and z by mul or sum").param(
            Parameter::keyword_only("op")
                .annotated(["sum", "mul"])
                .with_default("mul"),
        ),
        |args| {
            let op = args.keyword("op").cloned().unwrap_or_default();
            aggregate(&args, op.as_str()?)
        },
    )
}

/// `f3(*, op)`: pick `f1` for `sum` or `f2` for `mul`.
pub fn f3() -> Command {
    Command::new(
        Signature::new("f3")
            .doc("Select an aggregation command")
            .param(Parameter::keyword_only("op")),
        |args| {
            let op = args.keyword("op").cloned().unwrap_or_default();
            Ok(match op.as_str()? {
                "sum" => Value::from(f1()),
                "mul" => Value::from(f2()),
                _ => Value::None,
            })
        },
    )
}

/// `example(a, b: int, *others, d: float, e=10)`: report how arguments bound.
pub fn example() -> Command {
    Command::new(
        Signature::new("example")
            .doc("Show how each parameter kind is bound")
            .param(Parameter::positional("a"))
            .param(Parameter::positional("b").annotated(Coercion::int()))
            .param(Parameter::var_positional("others"))
            .param(Parameter::keyword_only("d").annotated(Coercion::float()))
            .param(Parameter::keyword_only("e").with_default(10)),
        |args| {
            let others = Value::List(args.positional.iter().skip(2).cloned().collect());
            let d = args.keyword("d").cloned().unwrap_or_default();
            let e = args.keyword("e").cloned().unwrap_or_default();
            Ok(Value::from(format!(
                "a={} b={} others={} d={} e={}",
                args.arg(0),
                args.arg(1),
                others,
                d,
                e
            )))
        },
    )
}

fn ints(values: &[Value]) -> Result<Vec<i64>> {
    values.iter().map(Value::as_int).collect()
}
