use crate::Error;
use miette::Report;
use std::path::Path;

/// Renders `error` with its diagnostic code and help to stderr, naming the
/// stage that failed.
pub fn report_program_error(path: &Path, error: Error) {
    let stage = match &error {
        Error::UnsupportedFile { .. } | Error::Io { .. } | Error::Json(_) => "loading",
        Error::Build(_) => "building",
        Error::Runtime(_) => "running",
    };
    let report = Report::new(error).wrap_err(format!("{stage} {} failed", path.display()));
    eprintln!("{report:?}");
}
