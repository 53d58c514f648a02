use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    #[error("cannot open {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("{0} is not a byte count")]
    OutOfDomain(f64),
}
