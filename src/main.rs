//! autoargs - dispatch a command line through signature-derived parsers.

mod cli;
mod demo;

use autoargs::{logging, AutoargsError, Dispatcher, OrExit, Result, Settings, Value};
use cli::{Cli, OutputFormat};
use tracing::info;

fn main() {
    let cli = Cli::parse_args();
    let result = run(&cli).or_exit();
    print_result(&result, cli.output).or_exit();
}

fn run(cli: &Cli) -> Result<Value> {
    let config_path = cli.config_path();
    let settings = Settings::load_from_file(&config_path)?;
    logging::init_stderr_logging(&settings.logging.filter);
    info!("Loaded config from: {}", config_path.display());

    let dispatcher = Dispatcher::new(settings);
    dispatcher.recursive_call(demo::namespace(), cli.args.clone(), None)
}

fn print_result(result: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{result}"),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result)
                .map_err(|e| AutoargsError::internal(format!("Failed to encode result: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}
