//! Gismo interpreter CLI.

use std::process::ExitCode;

use gismoc::config::{Command, Config, USAGE};

fn main() -> ExitCode {
    match Config::from_env() {
        Ok(Command::Run(config)) => gismoc::run(&config),
        Ok(Command::Help) => {
            println!("{USAGE}");
            println!();
            println!("Options:");
            println!("  -o <path>                     Output file for $WRITE/$WRITEB (default: out.a)");
            println!("  --color=<auto|always|never>   Colored diagnostics (default: auto)");
            println!("  -h, --help                    Print this help");
            println!("  -V, --version                 Print the version");
            println!();
            println!("Environment:");
            println!("  GISMO_CODE      Program text to run instead of a file");
            println!("  NO_OUT          Disable the output file when non-empty");
            println!("  GISMO_BEFORE    Prelude path (default: ./toolchain/before.gsm)");
            println!("  GISMO_AFTER     Epilogue path (default: ./toolchain/after.gsm)");
            println!("  RUST_LOG        Enable tracing, e.g. RUST_LOG=gismo_eval=debug");
            println!("  GISMO_LOG_TREE  Render traces as a tree");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("gismo {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(err) => gismoc::report_config_error(&err),
    }
}
