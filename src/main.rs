//! Logsim - Logic Circuit Definition Checker
//!
//! Parses a circuit definition file, reports every problem found and, for a
//! valid file, summarises the network that was built.
//!
//! # Usage
//!
//! ```bash
//! logsim circuit.txt
//! RUST_LOG=debug logsim --no-locations circuit.txt
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as _;
use logsim::{
    dsl::{ParseOptions, Parser, Scanner},
    error::{LogsimError, Result},
    Circuit, Names,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logic circuit definition checker
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit definition file
    #[arg(value_name = "DEFINITION_FILE")]
    definition_file: PathBuf,

    /// Do not print the source line and caret under each error
    #[arg(long)]
    no_locations: bool,

    /// Log parser progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<bool> {
    let source = std::fs::read_to_string(&args.definition_file)
        .map_err(|e| LogsimError::file_read(&args.definition_file, e))?;
    info!(path = %args.definition_file.display(), "parsing definition file");

    let mut names = Names::new();
    let mut circuit = Circuit::new(&mut names);
    let options = ParseOptions {
        inline_locations: !args.no_locations,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let (ok, errors) = {
        let scanner = Scanner::new(&source, &mut names);
        let mut parser = Parser::new(scanner, &mut circuit, &mut out, options);
        let ok = parser.parse_network();
        parser.check_output()?;
        (ok, parser.error_count())
    };

    let write_err = |source| LogsimError::DiagnosticOutput { source };
    if !ok {
        writeln!(out, "Parse failed with {} error(s)", errors).map_err(write_err)?;
        return Ok(false);
    }

    writeln!(
        out,
        "{} devices, {} connections, {} monitors",
        circuit.devices().len(),
        circuit.connection_count(),
        circuit.monitors().len()
    )
    .map_err(write_err)?;
    for signal in circuit.monitors() {
        writeln!(out, "  {}", signal.display_name(&names)).map_err(write_err)?;
    }
    Ok(true)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
