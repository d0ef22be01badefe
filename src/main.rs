// Blueprint: lexer and syntax checker for the blueprint teaching language

use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use blueprint::analysis::{Analysis, analyze};
use blueprint::config::LexerConfig;
use blueprint::lexer::{self, LexError, Token, TokenKind, TokenRecord};
use blueprint::parser::{self, Nonterminal, PredictTable, SyntaxError, grammar};
use blueprint::report;
use blueprint::ui::App;

#[derive(Parser, Debug)]
#[command(name = "blueprint")]
#[command(about = "Lex and syntax-check blueprint programs")]
struct Cli {
    /// Log filter directive, e.g. `debug` or `blueprint=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token stream and lexical errors
    Lex {
        file: PathBuf,

        /// Emit tokens and errors as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Show the DFA steps behind every token
        #[arg(long)]
        trace: bool,

        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Lex and parse a program, reporting the first syntax error
    Parse {
        #[arg(required_unless_present = "tokens")]
        file: Option<PathBuf>,

        /// Parse a JSON token stream produced by `lex --json` instead of a source file
        #[arg(long, value_name = "TOKENS.json", conflicts_with = "file")]
        tokens: Option<PathBuf>,

        /// Emit the verdict and diagnostics as JSON on stdout
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Browse tokens, traces and diagnostics in the terminal
    View {
        file: PathBuf,

        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Print the grammar productions
    Grammar {
        /// List alternatives whose predict sets overlap
        #[arg(long)]
        conflicts: bool,
    },
}

#[derive(Args, Debug)]
struct LimitArgs {
    /// JSON file with lexer limits
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long = "ident-max-len")]
    ident_max_len: Option<usize>,

    #[arg(long = "int-max-digits")]
    int_max_digits: Option<usize>,

    #[arg(long = "float-int-max-digits")]
    float_int_max_digits: Option<usize>,

    #[arg(long = "float-frac-max-digits")]
    float_frac_max_digits: Option<usize>,

    /// Keep over-long identifiers and numbers as flagged tokens
    #[arg(long = "emit-on-length-error")]
    emit_on_length_error: bool,
}

impl LimitArgs {
    /// Config file (or defaults) with command-line overrides applied.
    fn resolve(&self) -> Result<LexerConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => LexerConfig::load(path)?,
            None => LexerConfig::default(),
        };
        if let Some(value) = self.ident_max_len {
            config.ident_max_len = value;
        }
        if let Some(value) = self.int_max_digits {
            config.int_max_digits = value;
        }
        if let Some(value) = self.float_int_max_digits {
            config.float_int_max_digits = value;
        }
        if let Some(value) = self.float_frac_max_digits {
            config.float_frac_max_digits = value;
        }
        if self.emit_on_length_error {
            config.emit_token_on_length_error = true;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug)]
enum Outcome {
    Accepted,
    Rejected,
}

#[derive(Serialize)]
struct LexOutput<'a> {
    tokens: &'a [Token],
    errors: &'a [LexError],
}

/// Token input: a bare record array, or the whole `lex --json` document.
#[derive(Deserialize)]
#[serde(untagged)]
enum TokenInput {
    Records(Vec<TokenRecord>),
    Lexed { tokens: Vec<TokenRecord> },
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    accepted: bool,
    lex_errors: &'a [LexError],
    errors: &'a [SyntaxError],
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The viewer owns the terminal; log lines on stderr would tear the screen
    if !matches!(cli.command, Command::View { .. }) {
        init_logging(cli.log.as_deref());
    }

    let result = run(cli.command);
    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }
    ExitCode::from(exit_status(&result))
}

/// 0 accepted, 1 diagnostics reported, 2 usage or I/O failure.
fn exit_status(result: &Result<Outcome, Box<dyn Error>>) -> u8 {
    match result {
        Ok(Outcome::Accepted) => 0,
        Ok(Outcome::Rejected) => 1,
        Err(_) => 2,
    }
}

fn init_logging(directive: Option<&str>) {
    let filter = match directive {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command) -> Result<Outcome, Box<dyn Error>> {
    match command {
        Command::Lex {
            file,
            json,
            trace,
            limits,
        } => {
            let mut config = limits.resolve()?;
            config.record_trace = trace;
            lex_file(&file, json, &config)
        }
        Command::Parse {
            file,
            tokens,
            json,
            limits,
        } => match (file, tokens) {
            (_, Some(tokens)) => parse_token_file(&tokens, json),
            (Some(file), None) => parse_file(&file, json, &limits.resolve()?),
            (None, None) => Err("no input file provided".into()),
        },
        Command::View { file, limits } => {
            let mut config = limits.resolve()?;
            config.record_trace = true;
            view_file(&file, &config)
        }
        Command::Grammar { conflicts } => {
            print_grammar(conflicts);
            Ok(Outcome::Accepted)
        }
    }
}

fn read_source(path: &Path) -> Result<String, Box<dyn Error>> {
    fs::read_to_string(path).map_err(|err| format!("cannot read {}: {}", path.display(), err).into())
}

fn verdict(rejected: bool) -> Outcome {
    if rejected {
        Outcome::Rejected
    } else {
        Outcome::Accepted
    }
}

fn lex_file(path: &Path, json: bool, config: &LexerConfig) -> Result<Outcome, Box<dyn Error>> {
    let source = read_source(path)?;
    let (tokens, errors) = lexer::tokenize(&source, config);
    info!(tokens = tokens.len(), errors = errors.len(), "lexed {}", path.display());

    if json {
        let output = LexOutput {
            tokens: &tokens,
            errors: &errors,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(verdict(!errors.is_empty()));
    }

    let listed = tokens.iter().filter(|t| {
        !matches!(
            t.kind,
            TokenKind::Space | TokenKind::Tab | TokenKind::Newline
        )
    });
    for token in listed {
        let flag = if token.flagged { "  (flagged)" } else { "" };
        println!(
            "{:>4}:{:<4} {:<20} {:?}{}",
            token.location.line,
            token.location.column,
            token.tag(),
            token.lexeme,
            flag
        );
        for step in &token.trace {
            println!("{:>11}{:<16} --{:?}--> {}", "", step.state.to_string(), step.ch, step.label);
        }
    }

    let name = path.display().to_string();
    let diagnostics: Vec<_> = errors
        .iter()
        .map(|err| report::lex_diagnostic(&source, err))
        .collect();
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    report::emit(&mut stderr, &name, &source, &diagnostics)?;
    Ok(verdict(!errors.is_empty()))
}

fn parse_file(path: &Path, json: bool, config: &LexerConfig) -> Result<Outcome, Box<dyn Error>> {
    let source = read_source(path)?;
    let analysis = analyze(&source, config);
    info!(
        lex_errors = analysis.lex_errors.len(),
        syntax_errors = analysis.syntax_errors.len(),
        "analyzed {}",
        path.display()
    );

    if json {
        print_parse_json(&analysis.lex_errors, &analysis.syntax_errors, analysis.accepted())?;
        return Ok(verdict(!analysis.accepted()));
    }

    let name = path.display().to_string();
    let diagnostics: Vec<_> = analysis
        .lex_errors
        .iter()
        .map(|err| report::lex_diagnostic(&source, err))
        .chain(
            analysis
                .syntax_errors
                .iter()
                .map(|err| report::syntax_diagnostic(&source, err)),
        )
        .collect();
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    report::emit(&mut stderr, &name, &source, &diagnostics)?;

    print_verdict(&analysis);
    Ok(verdict(!analysis.accepted()))
}

fn print_verdict(analysis: &Analysis) {
    if analysis.accepted() {
        println!("accepted");
    } else if !analysis.parsed {
        println!(
            "rejected: {} lexical error(s), parser not run",
            analysis.lex_errors.len()
        );
    } else {
        println!("rejected");
    }
}

fn parse_token_file(path: &Path, json: bool) -> Result<Outcome, Box<dyn Error>> {
    let text = read_source(path)?;
    let records = match serde_json::from_str(&text)? {
        TokenInput::Records(records) | TokenInput::Lexed { tokens: records } => records,
    };
    let tokens = records
        .into_iter()
        .map(Token::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(tokens = tokens.len(), "loaded token stream");

    let errors = parser::parse(&tokens);
    if json {
        print_parse_json(&[], &errors, errors.is_empty())?;
    } else {
        // No source text to quote, so diagnostics are plain lines
        for err in &errors {
            eprintln!("{}:{}: {}", path.display(), err.start, err);
        }
        println!("{}", if errors.is_empty() { "accepted" } else { "rejected" });
    }
    Ok(verdict(!errors.is_empty()))
}

fn print_parse_json(
    lex_errors: &[LexError],
    errors: &[SyntaxError],
    accepted: bool,
) -> Result<(), serde_json::Error> {
    let output = ParseOutput {
        accepted,
        lex_errors,
        errors,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_grammar(conflicts: bool) {
    let table = PredictTable::standard();
    for &nt in Nonterminal::ALL {
        for (index, alternative) in nt.alternatives().iter().enumerate() {
            let predict: Vec<&str> = table.predict(nt, index).iter().map(|k| k.tag()).collect();
            println!("{}", grammar::format_production(nt, alternative));
            println!("    predict: {}", predict.join(" "));
        }
    }

    if !conflicts {
        return;
    }
    let found = table.conflicts();
    println!();
    println!("{} conflict(s), resolved by backtracking:", found.len());
    for conflict in &found {
        let overlap: Vec<&str> = conflict.overlap.iter().map(|k| k.tag()).collect();
        println!(
            "  {}: alternatives {} and {} share {}",
            conflict.nonterminal.name(),
            conflict.first,
            conflict.second,
            overlap.join(" ")
        );
    }
}

fn view_file(path: &Path, config: &LexerConfig) -> Result<Outcome, Box<dyn Error>> {
    let source = read_source(path)?;
    let analysis = analyze(&source, config);
    let accepted = analysis.accepted();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run the app
    let mut app = App::new(analysis, source, file_name);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    finish_view(res, accepted)
}

/// Outcome of a viewer session once the terminal has been restored.
fn finish_view(session: io::Result<()>, accepted: bool) -> Result<Outcome, Box<dyn Error>> {
    session?;
    Ok(verdict(!accepted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(Outcome::Accepted)), 0);
        assert_eq!(exit_status(&Ok(Outcome::Rejected)), 1);
        assert_eq!(exit_status(&Err("no input file provided".into())), 2);
    }

    #[test]
    fn test_viewer_failure_is_an_io_error() {
        let broken = io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away");
        let result = finish_view(Err(broken), true);
        assert_eq!(exit_status(&result), 2);
        assert!(result.unwrap_err().to_string().contains("terminal went away"));

        assert_eq!(exit_status(&finish_view(Ok(()), true)), 0);
        assert_eq!(exit_status(&finish_view(Ok(()), false)), 1);
    }
}
