//! Driver configuration from the command line and the environment.
//!
//! Options are parsed by hand. `-o` may appear before or after the file,
//! in either the `-o path` or the `-o=path` form.

use std::fmt;
use std::path::PathBuf;

use gismo_diagnostic::emitter::ColorMode;

pub const USAGE: &str = "Usage: gismo [-o <output-path>] [--color=auto|always|never] <file-path>";

/// Source path reported for programs given through `GISMO_CODE`.
pub const INLINE_SOURCE_NAME: &str = "ENVIRONMENT";

const DEFAULT_OUTPUT_PATH: &str = "out.a";
const DEFAULT_BEFORE_PATH: &str = "./toolchain/before.gsm";
const DEFAULT_AFTER_PATH: &str = "./toolchain/after.gsm";

/// Where the main program comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    /// Program text from `GISMO_CODE`.
    Inline(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub input: Input,
    /// Target of `$WRITE` and `$WRITEB`.
    pub output_path: PathBuf,
    /// `false` when `NO_OUT` is set; no output file is created then.
    pub output_enabled: bool,
    pub color: ColorMode,
    /// Prelude, run before the program when it exists.
    pub before_path: PathBuf,
    /// Epilogue, run after the program when it exists.
    pub after_path: PathBuf,
}

/// What the command line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    #[cold]
    fn new(message: impl Into<String>) -> Self {
        ConfigError {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Read the process arguments and environment.
    pub fn from_env() -> Result<Command, ConfigError> {
        Self::from_args_and_env(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// `args` excludes the program name. `env` looks up a variable.
    pub fn from_args_and_env<I, F>(args: I, env: F) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        // Set and non-empty.
        let env = |key: &str| env(key).filter(|value| !value.is_empty());

        let mut output_path = None;
        let mut color = ColorMode::default();
        let mut file = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "-V" | "--version" => return Ok(Command::Version),
                "-o" => {
                    let Some(path) = args.next() else {
                        return Err(ConfigError::new("flag needs an argument: -o"));
                    };
                    output_path = Some(PathBuf::from(path));
                }
                _ => {
                    if let Some(path) = arg.strip_prefix("-o=") {
                        output_path = Some(PathBuf::from(path));
                    } else if let Some(mode) = arg.strip_prefix("--color=") {
                        color = ColorMode::parse(mode).ok_or_else(|| {
                            ConfigError::new(format!(
                                "invalid color mode `{mode}`, expected auto, always or never"
                            ))
                        })?;
                    } else if arg.len() > 1 && arg.starts_with('-') {
                        return Err(ConfigError::new(format!("unknown option `{arg}`")));
                    } else if file.is_none() {
                        file = Some(PathBuf::from(arg));
                    } else {
                        return Err(ConfigError::new(format!("unexpected argument `{arg}`")));
                    }
                }
            }
        }

        let input = match (env("GISMO_CODE"), file) {
            (Some(code), _) => Input::Inline(code),
            (None, Some(file)) => Input::File(file),
            (None, None) => return Err(ConfigError::new("missing file argument")),
        };

        Ok(Command::Run(Config {
            input,
            output_path: output_path.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            output_enabled: env("NO_OUT").is_none(),
            color,
            before_path: env("GISMO_BEFORE").map_or_else(|| DEFAULT_BEFORE_PATH.into(), PathBuf::from),
            after_path: env("GISMO_AFTER").map_or_else(|| DEFAULT_AFTER_PATH.into(), PathBuf::from),
        }))
    }
}
