use std::process::ExitCode;

use ttdata_cli::cli::cli_main;
use ttdata_cli::config::Config;

fn main() -> ExitCode {
    cli_main(Config::from_env())
}
