//! IR Command
//!
//! Convert Morphir IR distribution files between format versions and check
//! that they decode cleanly.

use crate::error::CliError;
use crate::output::{OutputFormat, write_json};
use morphir_ir::codec::json::{decode_versioned_distribution, encode_versioned_distribution};
use morphir_ir::ir::{Access, Distribution};
use morphir_ir::FormatVersion;
use serde::Serialize;
use starbase::AppResult;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Output path meaning "write to stdout".
pub const STDOUT: &str = "-";

/// JSON output for the convert command
#[derive(Debug, Serialize)]
pub struct ConvertResult {
    pub success: bool,
    pub input: String,
    pub output: String,
    pub source_format: String,
    pub target_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConvertResult {
    fn error(input: &Path, output: &str, error: &CliError) -> Self {
        Self {
            success: false,
            input: input.display().to_string(),
            output: output.to_string(),
            source_format: String::new(),
            target_format: String::new(),
            error: Some(error.detailed_message()),
        }
    }
}

/// JSON output for the validate command
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ValidateResult {
    pub success: bool,
    pub input: String,
    pub format_version: u64,
    pub package: String,
    pub dependencies: usize,
    pub modules: usize,
    pub public_modules: usize,
    pub types: usize,
    pub values: usize,
}

/// Parse a user supplied format version (`3`, `v3`, `V3`).
pub fn parse_format_version(text: &str) -> Result<FormatVersion, CliError> {
    FormatVersion::from_str(text).map_err(|_| CliError::InvalidArgument {
        message: format!("unknown format version '{text}'. Valid values: 1, 2, 3, v1, v2, v3"),
    })
}

/// Read and decode a distribution file, taking the version from its envelope.
pub fn read_distribution(path: &Path) -> Result<(FormatVersion, Distribution), CliError> {
    let bytes = std::fs::read(path).map_err(|error| CliError::Read {
        path: path.to_path_buf(),
        error,
    })?;
    debug!(path = %path.display(), len = bytes.len(), "read distribution file");

    decode_versioned_distribution(&bytes).map_err(|error| CliError::Decode {
        path: path.to_path_buf(),
        error,
    })
}

/// Decode `input` and re-encode it at `target`. Returns the source version
/// and the encoded distribution file.
pub fn convert_distribution(
    input: &Path,
    target: FormatVersion,
) -> Result<(FormatVersion, Vec<u8>), CliError> {
    let (source, distribution) = read_distribution(input)?;
    info!(%source, %target, package = %distribution.package_name(), "converting distribution");

    let bytes = encode_versioned_distribution(target, &distribution)
        .map_err(|error| CliError::Encode { error })?;
    Ok((source, bytes))
}

/// Decode `input` and count what it contains. When `expected` is given the
/// envelope must declare that version.
pub fn validate_distribution(
    input: &Path,
    expected: Option<FormatVersion>,
) -> Result<ValidateResult, CliError> {
    let (version, distribution) = read_distribution(input)?;
    if let Some(expected) = expected.filter(|e| *e != version) {
        return Err(CliError::VersionMismatch {
            declared: version.to_string(),
            expected: expected.to_string(),
        });
    }

    let library = distribution.as_library();
    let modules = &library.definition.modules;
    let (types, values) = modules.iter().fold((0, 0), |(types, values), (_, module)| {
        let module = module.value();
        (types + module.types.len(), values + module.values.len())
    });

    Ok(ValidateResult {
        success: true,
        input: input.display().to_string(),
        format_version: version.number(),
        package: library.package_name.to_string(),
        dependencies: library.dependencies.len(),
        modules: modules.len(),
        public_modules: modules
            .iter()
            .filter(|(_, module)| module.access() == Access::Public)
            .count(),
        types,
        values,
    })
}

fn write_output(output: &str, bytes: &[u8]) -> Result<(), CliError> {
    if output == STDOUT {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        return handle
            .write_all(bytes)
            .and_then(|()| writeln!(handle))
            .map_err(|error| CliError::Write {
                path: PathBuf::from(STDOUT),
                error,
            });
    }
    std::fs::write(output, bytes).map_err(|error| CliError::Write {
        path: PathBuf::from(output),
        error,
    })
}

/// Run the convert command.
///
/// # Arguments
/// * `input` - Distribution file to read
/// * `output` - Output file path, or `-` for stdout
/// * `to` - Target format version
/// * `format` - Output format for the command result
pub fn run_convert(input: PathBuf, output: String, to: String, format: OutputFormat) -> AppResult {
    let result = parse_format_version(&to).and_then(|target| {
        let (source, bytes) = convert_distribution(&input, target)?;
        write_output(&output, &bytes)?;
        Ok((source, target))
    });

    match result {
        Ok((source, target)) => {
            if format.is_json() && output != STDOUT {
                write_json(&ConvertResult {
                    success: true,
                    input: input.display().to_string(),
                    output: output.clone(),
                    source_format: source.to_string(),
                    target_format: target.to_string(),
                    error: None,
                })
                .map_err(CliError::from)?;
            } else if output != STDOUT {
                eprintln!("Converted {} ({source}) to {output} ({target})", input.display());
            }
            Ok(None)
        }
        Err(err) => {
            if format.is_json() {
                write_json(&ConvertResult::error(&input, &output, &err)).map_err(CliError::from)?;
            } else {
                err.report_with_format(format);
            }
            Ok(Some(1))
        }
    }
}

/// Run the validate command.
pub fn run_validate(
    input: PathBuf,
    format_version: Option<String>,
    format: OutputFormat,
) -> AppResult {
    let result = format_version
        .as_deref()
        .map(parse_format_version)
        .transpose()
        .and_then(|expected| validate_distribution(&input, expected));

    match result {
        Ok(summary) => {
            if format.is_json() {
                write_json(&summary).map_err(CliError::from)?;
            } else {
                println!("{} is valid (format v{})", summary.input, summary.format_version);
                println!("  package:      {}", summary.package);
                println!("  dependencies: {}", summary.dependencies);
                println!("  modules:      {} ({} public)", summary.modules, summary.public_modules);
                println!("  types:        {}", summary.types);
                println!("  values:       {}", summary.values);
            }
            Ok(None)
        }
        Err(err) => {
            err.report_with_format(format);
            Ok(Some(1))
        }
    }
}
