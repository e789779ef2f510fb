//! xmlpipe CLI - XML validate/transform/validate/serialize tool

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use xmlpipe::{process_file, FileLog};

#[derive(Parser)]
#[command(name = "xmlpipe")]
#[command(version)]
#[command(
    about = "Validate an XML document, transform it, re-validate, and write the result",
    long_about = None
)]
struct Cli {
    /// Input XML document
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Schema definition the input is validated against
    #[arg(value_name = "INPUT_SCHEMA")]
    input_schema: PathBuf,

    /// Transform definition applied to the input
    #[arg(value_name = "TRANSFORM")]
    transform: PathBuf,

    /// Schema definition the transformed output is validated against
    #[arg(value_name = "OUTPUT_SCHEMA")]
    output_schema: PathBuf,

    /// Output file for the transformed document
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Diagnostic log file
    #[arg(long, value_name = "FILE", env = "XMLPIPE_LOG", default_value = "logs.txt")]
    log: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let sink = match FileLog::open(&cli.log) {
        Ok(sink) => sink,
        Err(err) => {
            eprintln!(
                "{} cannot open diagnostic log {}: {}",
                "error:".red().bold(),
                cli.log.display(),
                err
            );
            return ExitCode::FAILURE;
        }
    };

    match process_file(
        &cli.input,
        &cli.input_schema,
        &cli.transform,
        &cli.output_schema,
        &cli.output,
        &sink,
    ) {
        Ok(()) => {
            println!(
                "{} wrote {}",
                "success:".green().bold(),
                cli.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::debug!("pipeline failed: {:?}", err.kind());
            eprintln!(
                "{} {} (log: {})",
                "error:".red().bold(),
                err,
                cli.log.display()
            );
            ExitCode::FAILURE
        }
    }
}
