//! Binary entry point for the refmine CLI.
//!
//! The CLI exposes the refactoring catalog and description checks. All
//! output is JSON on stdout; logs go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! # List every refactoring type with its abbreviation and pattern
//! refmine types
//!
//! # Classify a description and show its aggregate form
//! refmine describe $'Rename Method\tpublic a() : void renamed to public b() : void in class x.C'
//!
//! # Re-validate a report produced elsewhere (`-` reads stdin)
//! refmine check report.json
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use refmine::error::{MinerError, MinerResult, OutputErrorCode};
use refmine::logging::{self, LogFormat, LogLevel};
use refmine::output::{
    emit_response, CatalogResponse, CheckResponse, DescribeResponse, ErrorResponse,
    RefactoringReport,
};

// ============================================================================
// CLI Structure
// ============================================================================

/// Refactoring catalog and report checks.
#[derive(Parser, Debug)]
#[command(name = "refmine", version, about = "Refactoring catalog and report checks")]
struct Cli {
    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Log line format.
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every refactoring type.
    Types,
    /// Identify the type of a description and aggregate it.
    Describe {
        /// Full description, `<Display Name>` followed by whitespace and detail.
        description: String,
    },
    /// Validate every record of a JSON report.
    Check {
        /// Report file, or `-` for stdin.
        #[arg(default_value = "-")]
        report: PathBuf,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.log_level, cli.log_format);

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON like every other response
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();

            ExitCode::from(code.code())
        }
    }
}

fn execute(command: Command) -> MinerResult<()> {
    let mut stdout = io::stdout();
    match command {
        Command::Types => emit(&CatalogResponse::new(), &mut stdout),
        Command::Describe { description } => {
            let response = DescribeResponse::from_description(&description)?;
            emit(&response, &mut stdout)
        }
        Command::Check { report } => {
            let report = read_report(&report)?;
            let response = CheckResponse::validate(&report)?;
            emit(&response, &mut stdout)
        }
    }
}

fn emit<T: serde::Serialize>(response: &T, writer: &mut impl Write) -> MinerResult<()> {
    emit_response(response, writer).map_err(|e| MinerError::InvalidArguments {
        message: format!("failed to write response: {}", e),
    })
}

fn read_report(path: &Path) -> MinerResult<RefactoringReport> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| MinerError::InvalidArguments {
                message: format!("failed to read stdin: {}", e),
            })?;
        buf
    } else {
        fs::read_to_string(path).map_err(|e| MinerError::InvalidArguments {
            message: format!("failed to read {}: {}", path.display(), e),
        })?
    };
    tracing::debug!(path = %path.display(), bytes = text.len(), "read report");
    serde_json::from_str(&text).map_err(|e| MinerError::InvalidArguments {
        message: format!("malformed report: {}", e),
    })
}
