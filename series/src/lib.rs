mod aggregate;
mod error;
mod record;
mod units;

pub use aggregate::{Series, SeriesSet};
pub use error::{SeriesError, UnitError};
pub use record::{Measurement, MeasurementWriter, from_reader, read_measurements};
pub use units::{UNITS, human_bytes, tick_label};

/// Reads `path` and groups its rows into size-sorted series.
pub fn load(path: impl AsRef<std::path::Path>) -> Result<SeriesSet, SeriesError> {
    let rows = read_measurements(path)?;
    Ok(SeriesSet::from_measurements(rows))
}
