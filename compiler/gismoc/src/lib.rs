//! Gismo driver: configuration, source assembly, evaluation and error
//! reporting.
//!
//! A run lexes the prelude, the program and the epilogue separately (each
//! under its own [`SourceId`](gismo_ir::SourceId)), joins the token streams
//! with statement separators, parses them as one module and evaluates it.
//! Any failure is rendered as a diagnostic on stderr and turns into exit
//! status 1.

pub mod config;
pub mod loader;
pub mod problem;
mod tracing_setup;

use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use gismo_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use gismo_eval::{stdout_handler, Interpreter, InterpreterBuilder, OutputSink, Value};
use gismo_ir::{SharedSourceMap, Span, Token, TokenKind};

pub use config::{Command, Config, ConfigError, Input};
pub use loader::FileLoader;
pub use problem::Problem;
pub use tracing_setup::init_tracing;

/// A named source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceText {
    pub path: String,
    pub text: String,
}

impl SourceText {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        SourceText {
            path: path.into(),
            text: text.into(),
        }
    }

    /// `None` if the file does not exist or cannot be read.
    fn read_optional(path: &Path) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?;
        Some(SourceText::new(path.display().to_string(), text))
    }
}

/// Lex every part under its own source id and parse the result as one
/// module, then lower it to a runtime value.
#[tracing::instrument(level = "debug", skip_all, fields(parts = parts.len()))]
pub fn load_program(sources: &SharedSourceMap, parts: &[SourceText]) -> Result<Value, Problem> {
    let mut tokens: Vec<Token> = Vec::new();
    for part in parts {
        let id = sources.add(&part.path, &part.text);
        let mut part_tokens = gismo_lexer::tokenize(&part.text, id)?;

        // Only the last part keeps its end-of-file token.
        if let Some(previous) = tokens.pop() {
            debug_assert!(previous.is(TokenKind::Eof));
            let at = Span::new(previous.span.source, previous.span.end, previous.span.end);
            tokens.push(Token::new(TokenKind::Newline, "\n", at, 0));
        }
        tokens.append(&mut part_tokens);
    }

    let tree = gismo_parse::parse(tokens)?;
    Ok(gismo_eval::lower(&tree)?)
}

/// Load `parts` and run them as one program on `interp`.
pub fn evaluate_source(
    interp: &mut Interpreter,
    sources: &SharedSourceMap,
    parts: &[SourceText],
) -> Result<Value, Problem> {
    let program = load_program(sources, parts)?;
    Ok(interp.run_program(&program)?)
}

/// Render `problem` through `emitter`.
pub fn emit_problem(problem: &Problem, emitter: &mut impl DiagnosticEmitter) {
    emitter.emit(&problem.to_diagnostic());
    emitter.flush();
}

fn read_input(config: &Config) -> Result<SourceText, Problem> {
    match &config.input {
        Input::Inline(code) => Ok(SourceText::new(config::INLINE_SOURCE_NAME, code.clone())),
        Input::File(path) => std::fs::read_to_string(path)
            .map(|text| SourceText::new(path.display().to_string(), text))
            .map_err(|err| Problem::driver(format!("cannot read `{}`: {err}", path.display()))),
    }
}

fn run_with_sources(config: &Config, sources: &SharedSourceMap) -> Result<(), Problem> {
    let main = read_input(config)?;
    let parts: Vec<SourceText> = SourceText::read_optional(&config.before_path)
        .into_iter()
        .chain(Some(main))
        .chain(SourceText::read_optional(&config.after_path))
        .collect();
    let program = load_program(sources, &parts)?;

    let output = if config.output_enabled {
        OutputSink::create(&config.output_path).map_err(|err| {
            Problem::driver(format!(
                "cannot create output file `{}`: {err}",
                config.output_path.display()
            ))
        })?
    } else {
        OutputSink::Disabled
    };

    let mut interp = InterpreterBuilder::new()
        .print_handler(stdout_handler())
        .output(output)
        .loader(FileLoader::new(sources.clone()))
        .colors(config.color.should_use_colors(std::io::stdout().is_terminal()))
        .build();
    interp.run_program(&program)?;
    Ok(())
}

/// Run a configured program, reporting any failure on stderr.
pub fn run(config: &Config) -> ExitCode {
    init_tracing();
    let sources = SharedSourceMap::new();
    match run_with_sources(config, &sources) {
        Ok(()) => ExitCode::SUCCESS,
        Err(problem) => {
            tracing::debug!(code = %problem.code(), "run failed");
            let mut emitter = TerminalEmitter::stderr(config.color).with_sources(sources);
            emit_problem(&problem, &mut emitter);
            ExitCode::FAILURE
        }
    }
}

/// Report a command-line error followed by the usage line.
pub fn report_config_error(err: &ConfigError) -> ExitCode {
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto);
    emit_problem(&Problem::driver(err.to_string()), &mut emitter);
    eprintln!("{}", config::USAGE);
    ExitCode::FAILURE
}
