use std::process::ExitCode;

use dbeetle_config::{resolve_config, ConfigError, Error};
use tracing_subscriber::EnvFilter;

// cargo run --example resolve -- --config=demos/dbeetle.yaml --db_type=postgres
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match resolve_config(std::env::args()) {
        Ok(config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => {
                print!("{rendered}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Err(Error::Config(e @ ConfigError::ParseError { .. })) => {
            eprintln!("Error line {} col {}: {e}", e.line(), e.column());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
