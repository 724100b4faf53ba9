use clap::{Args, Parser as ClapParser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use wq_lang::cli::{self, CheckOptions, CliError};

#[derive(ClapParser)]
#[command(name = "wq")]
#[command(about = "wq - lexer, parser and formatter for the wq array language")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the wq source comes from
#[derive(Args)]
struct SourceArgs {
    /// Source file (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Source text given on the command line
    #[arg(short = 'e', long = "eval")]
    code: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check wq source for syntax errors
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Keep going after an error and report every bad statement
        #[arg(long)]
        recover: bool,

        /// Don't print anything when the source is valid
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the token stream
    Tokens {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the syntax tree as JSON
    Ast {
        #[command(flatten)]
        source: SourceArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Include byte-offset spans on every node
        #[arg(long)]
        spans: bool,
    },

    /// Print the source in canonical layout
    Fmt {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'wq docs' to list categories)
        category: String,
    },
}

struct Input {
    name: String,
    text: String,
}

fn main() {
    let cli = Cli::parse();

    let (input, result) = match cli.command {
        Commands::Check {
            source,
            recover,
            quiet,
        } => with_input(source, |input| run_check(input, recover, quiet)),
        Commands::Tokens { source } => with_input(source, |input| {
            print!("{}", cli::list_tokens(&input.text)?);
            Ok(())
        }),
        Commands::Ast {
            source,
            pretty,
            spans,
        } => with_input(source, |input| {
            println!("{}", cli::dump_ast(&input.text, pretty, spans)?);
            Ok(())
        }),
        Commands::Fmt { source } => with_input(source, |input| {
            print!("{}", cli::format_source(&input.text)?);
            Ok(())
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            (None, Ok(()))
        }
        Commands::Doc { category } => (
            None,
            cli::get_doc_category(&category).map(|content| print!("{}", content)),
        ),
    };

    if let Err(e) = result {
        if let (CliError::Parse(diagnostics), Some(input)) = (&e, &input) {
            report(input, diagnostics);
        }
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn with_input(
    args: SourceArgs,
    run: impl FnOnce(&Input) -> Result<(), CliError>,
) -> (Option<Input>, Result<(), CliError>) {
    match read_input(args) {
        Ok(input) => {
            let result = run(&input);
            (Some(input), result)
        }
        Err(e) => (None, Err(e)),
    }
}

fn read_input(args: SourceArgs) -> Result<Input, CliError> {
    if let Some(code) = args.code {
        return Ok(Input {
            name: "<eval>".to_string(),
            text: code,
        });
    }
    if let Some(path) = args.file {
        let text = fs::read_to_string(&path)?;
        return Ok(Input {
            name: path.display().to_string(),
            text,
        });
    }
    if !atty::is(atty::Stream::Stdin) {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(Input {
            name: "<stdin>".to_string(),
            text,
        });
    }
    Err(CliError::NoInput)
}

fn report(input: &Input, diagnostics: &[wq_lang::Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let color = atty::is(atty::Stream::Stderr);
    eprint!(
        "{}",
        cli::render_diagnostics(&input.name, &input.text, diagnostics, color)
    );
}

fn run_check(input: &Input, recover: bool, quiet: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        source: input.text.clone(),
        recover,
    };

    let check = cli::execute_check(&options);
    if !check.is_valid() {
        return Err(CliError::Parse(check.diagnostics));
    }

    // Valid source can still carry warnings
    report(input, &check.diagnostics);
    if !quiet {
        println!("Syntax is valid ({} statements)", check.statements);
    }
    Ok(())
}
