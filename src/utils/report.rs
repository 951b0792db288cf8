//! Report output: console listing or CSV file.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{ArticleRecord, RECORD_HEADERS};
use crate::sources::SourceError;

/// Printed when a search produced no records
pub const NO_RESULTS_MESSAGE: &str = "No results found for the query.";

/// What [`report`] ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Nothing to report; no file was written
    NoResults,
    /// Records were written to this CSV file
    Saved(PathBuf),
    /// This many records were printed
    Printed(usize),
}

/// Report records either to a CSV file or to `out`.
///
/// With no records only [`NO_RESULTS_MESSAGE`] is printed, even when a file
/// path was supplied.
pub fn report<W: Write>(
    records: &[ArticleRecord],
    file: Option<&Path>,
    out: &mut W,
) -> Result<ReportOutcome, SourceError> {
    if records.is_empty() {
        writeln!(out, "{}", NO_RESULTS_MESSAGE)?;
        return Ok(ReportOutcome::NoResults);
    }

    match file {
        Some(path) => {
            save_to_csv(records, path)?;
            tracing::debug!(count = records.len(), path = %path.display(), "Saved records");
            writeln!(out, "Results saved to {}", path.display())?;
            Ok(ReportOutcome::Saved(path.to_path_buf()))
        }
        None => {
            print_records(records, out)?;
            Ok(ReportOutcome::Printed(records.len()))
        }
    }
}

/// Print every record in full as pretty JSON
pub fn print_records<W: Write>(records: &[ArticleRecord], out: &mut W) -> Result<(), SourceError> {
    writeln!(out, "Results:")?;
    for record in records {
        writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
    }
    Ok(())
}

/// Write records as CSV (header row plus one row per record)
pub fn write_csv<W: Write>(records: &[ArticleRecord], writer: W) -> Result<(), SourceError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(RECORD_HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write records to a CSV file at `path`, replacing any existing file
pub fn save_to_csv(records: &[ArticleRecord], path: &Path) -> Result<(), SourceError> {
    let file = std::fs::File::create(path)?;
    write_csv(records, file)
}

/// Read records back from a CSV file produced by [`save_to_csv`]
pub fn read_csv(path: &Path) -> Result<Vec<ArticleRecord>, SourceError> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader.deserialize().collect::<Result<Vec<ArticleRecord>, _>>()?;
    Ok(records)
}
