use crate::error::SeriesError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

pub const HEADER: [&str; 3] = ["size", "method", "ns"];

/// One row of a benchmark table: how long `method` took to extend a buffer of `size` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub size: u64,
    pub method: String,
    #[serde(rename = "ns")]
    pub elapsed: u64,
}

impl Measurement {
    pub fn new(size: u64, method: impl Into<String>, elapsed: u64) -> Self {
        Self {
            size,
            method: method.into(),
            elapsed,
        }
    }
}

pub fn read_measurements(path: impl AsRef<Path>) -> Result<Vec<Measurement>, SeriesError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SeriesError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = from_reader(file)?;
    debug!("read {} measurements from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parses every row of a headed table. The first bad row aborts the whole read.
pub fn from_reader<R: Read>(rdr: R) -> Result<Vec<Measurement>, SeriesError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let row: Measurement = record
            .deserialize(Some(&headers))
            .map_err(|e| malformed(line, e))?;
        if row.method.is_empty() {
            return Err(SeriesError::MalformedRow {
                line,
                reason: "empty method".to_string(),
            });
        }
        rows.push(row);
    }

    Ok(rows)
}

fn malformed(line: u64, err: csv::Error) -> SeriesError {
    if let csv::ErrorKind::Deserialize { err: de, .. } = err.kind() {
        return SeriesError::MalformedRow {
            line,
            reason: de.to_string(),
        };
    }
    SeriesError::Csv(err)
}

/// Writes measurements as `size,method,ns` rows. The header is written up front,
/// so a table with no samples is still readable.
pub struct MeasurementWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl MeasurementWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SeriesError> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> MeasurementWriter<W> {
    pub fn new(wtr: W) -> Result<Self, SeriesError> {
        let mut inner = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(wtr);
        inner.write_record(HEADER)?;
        Ok(Self { inner })
    }

    pub fn write(&mut self, row: &Measurement) -> Result<(), SeriesError> {
        self.inner.serialize(row)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), SeriesError> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, SeriesError> {
        self.inner
            .into_inner()
            .map_err(|e| SeriesError::Io(e.into_error()))
    }
}
