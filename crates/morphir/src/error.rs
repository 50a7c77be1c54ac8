//! Error handling utilities for CLI commands

use crate::output::{Diagnostic, OutputFormat};
use miette::Diagnostic as MietteDiagnostic;
use morphir_ir::CodecError;
use std::path::PathBuf;

/// CLI error that can be formatted for human or JSON output
#[derive(Debug, thiserror::Error, MietteDiagnostic)]
pub enum CliError {
    #[error("Failed to read {}", .path.display())]
    #[diagnostic(code(cli::read_error))]
    Read {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to write {}", .path.display())]
    #[diagnostic(code(cli::write_error))]
    Write {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Invalid Morphir IR in {}", .path.display())]
    #[diagnostic(
        code(cli::decode_error),
        help("check that the file's formatVersion matches its tag casing")
    )]
    Decode {
        path: PathBuf,
        #[source]
        error: CodecError,
    },

    #[error("Failed to encode Morphir IR")]
    #[diagnostic(code(cli::encode_error))]
    Encode {
        #[source]
        error: CodecError,
    },

    #[error("Version mismatch: file declares {declared}, expected {expected}")]
    #[diagnostic(code(cli::version_mismatch))]
    VersionMismatch { declared: String, expected: String },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(cli::invalid_argument))]
    InvalidArgument { message: String },

    #[error("Output error")]
    #[diagnostic(code(cli::output_error))]
    Output {
        #[source]
        error: anyhow::Error,
    },
}

impl CliError {
    /// Message followed by its direct cause. Codec errors already render
    /// their own context path, so deeper causes are not repeated.
    pub fn detailed_message(&self) -> String {
        match std::error::Error::source(self) {
            Some(cause) => format!("{self}: {cause}"),
            None => self.to_string(),
        }
    }

    /// Convert to diagnostic for JSON output
    pub fn to_diagnostic(&self) -> Diagnostic {
        let file = match self {
            CliError::Read { path, .. }
            | CliError::Write { path, .. }
            | CliError::Decode { path, .. } => Some(path.display().to_string()),
            _ => None,
        };
        Diagnostic {
            level: "error".to_string(),
            message: self.detailed_message(),
            file,
        }
    }

    /// Report error based on output format
    pub fn report_with_format(&self, format: OutputFormat) {
        match format {
            OutputFormat::Human => eprintln!("error: {}", self.detailed_message()),
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string_pretty(&self.to_diagnostic()) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        CliError::Output { error }
    }
}
