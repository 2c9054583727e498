//! Dispatching with settings loaded from a config file.

use std::io::Write;

use autoargs::{Coercion, ColorMode, Command, Dispatcher, Parameter, Settings, Signature, Value};
use tempfile::NamedTempFile;

fn describe() -> Command {
    Command::new(
        Signature::new("describe")
            .param(Parameter::positional("x").annotated(Coercion::int()))
            .param(Parameter::positional("y").with_default("b")),
        |args| {
            Ok(Value::from(format!(
                "positional={} keyword={}",
                args.positional.len(),
                args.keyword.len()
            )))
        },
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_to_arg_from_config() {
    let file = write_config(
        r#"
default_to_arg = false
color = "never"
"#,
    );
    let settings = Settings::load_from_file(file.path()).unwrap();
    assert!(!settings.default_to_arg);
    assert_eq!(settings.color, ColorMode::Never);

    let result = Dispatcher::new(settings).call(&describe(), "1").unwrap();
    assert_eq!(result, Value::from("positional=0 keyword=2"));
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from_file(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings, Settings::default());

    let result = Dispatcher::new(settings).call(&describe(), "1").unwrap();
    assert_eq!(result, Value::from("positional=2 keyword=0"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let file = write_config("default_to_arg = \"sometimes\"");
    let err = Settings::load_from_file(file.path()).unwrap_err();
    assert_eq!(err.category(), "Configuration Error");
}
