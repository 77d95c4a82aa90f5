use procgap::{
    cli::{Cli, CliHandler},
    error::ProcGapError,
};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command line arguments
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            process::exit(2);
        }
    };

    init_tracing(&cli);

    // Create and run the CLI handler
    let handler = CliHandler::new(cli);

    let exit_code = match handler.run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            match e {
                ProcGapError::NoInput | ProcGapError::InvalidSensorData(_) => 2, // bad input
                ProcGapError::AllAnalyzersFailed => 4,                           // cycle aborted
                ProcGapError::NodeNotFound { .. } | ProcGapError::EdgeNotFound { .. } => 5,
                ProcGapError::IoError(_) => 6, // data file unreadable
                _ => 1,                        // general error
            }
        }
    };

    process::exit(exit_code);
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "procgap=debug"
    } else {
        "procgap=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
