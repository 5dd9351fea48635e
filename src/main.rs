use anyhow::{Context, Result};
use bluelang::{diagnostics, Lexer, LexerError};
use clap::{CommandFactory, Parser};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::{self, termcolor::{ColorChoice, StandardStream}};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Message attached to every illegal-token diagnostic.
const ILLEGAL_TOKEN_MESSAGE: &str = "lexer error encountered";

#[derive(Parser)]
#[command(name = "blue")]
#[command(author, about = "The Blue language scanner", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Lex a file and print its tokens
    #[arg(short = 'l', long = "lex", value_name = "FILE")]
    lex: Option<PathBuf>,

    /// Lex a file and print a diagnostic for every illegal token
    #[arg(short = 's', long = "spans", value_name = "FILE")]
    spans: Option<PathBuf>,

    /// Print the version
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Print the token stream as JSON (with --lex)
    #[arg(long, requires = "lex")]
    json: bool,

    /// Render diagnostics with labelled source snippets (with --spans)
    #[arg(long, requires = "spans")]
    rich: bool,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match run(&cli) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Runs the requested modes in order. Returns `false` when illegal tokens
/// were reported.
fn run(cli: &Cli) -> Result<bool> {
    let mut clean = true;

    if let Some(path) = &cli.lex {
        lex_file(path, cli.json)?;
    }
    if let Some(path) = &cli.spans {
        clean &= span_file(path, cli.rich)?;
    }
    if cli.version {
        println!("v{}", env!("CARGO_PKG_VERSION"));
    }
    if cli.lex.is_none() && cli.spans.is_none() && !cli.version {
        Cli::command().print_help()?;
    }

    Ok(clean)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read source file: {:?}", path))
}

fn lex_file(path: &Path, json: bool) -> Result<()> {
    log::info!("Lexing {:?}", path);
    let source = read_source(path)?;
    let lexer = Lexer::new(&source, path.display().to_string());

    if json {
        let tokens = lexer.collect_tokens();
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in lexer {
            println!("{}", token);
        }
    }
    Ok(())
}

fn span_file(path: &Path, rich: bool) -> Result<bool> {
    log::info!("Checking {:?}", path);
    let source = read_source(path)?;
    let mut lexer = Lexer::new(&source, path.display().to_string());

    let illegal = diagnostics::illegal_tokens(&mut lexer);
    log::debug!(
        "{} illegal token(s) in {} ({} characters)",
        illegal.len(),
        lexer.name(),
        lexer.input_len()
    );

    if rich {
        let mut files = SimpleFiles::new();
        let file_id = files.add(lexer.name().to_string(), source.clone());
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = term::Config::default();
        for error in illegal.iter().filter_map(|t| LexerError::from_token(t, &lexer)) {
            let diagnostic = error.to_diagnostic(file_id, &source);
            term::emit(&mut writer.lock(), &config, &files, &diagnostic)?;
        }
    } else {
        for token in &illegal {
            print!("{}", lexer.render(token.span, ILLEGAL_TOKEN_MESSAGE));
        }
    }

    Ok(illegal.is_empty())
}
