mod extend;

use anyhow::{Context, Result, bail};
use clap::Parser;
use series::{Measurement, MeasurementWriter};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Times growing a buffer to twice its size by copying versus remapping,
/// and writes one `size,method,ns` row per sample.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "result.csv")]
    output: PathBuf,

    /// Smallest buffer is 2^min_shift bytes.
    #[arg(long, default_value_t = 10)]
    min_shift: u32,

    /// Largest buffer is 2^max_shift bytes.
    #[arg(long, default_value_t = 27)]
    max_shift: u32,

    #[arg(long, default_value_t = 5)]
    repeats: u32,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let sizes = sizes(args.min_shift, args.max_shift)?;

    let mut out = MeasurementWriter::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    if !extend::MREMAP_SUPPORTED {
        warn!("mremap is not available on this platform, only memcpy will be measured");
    }

    let mut rows = 0usize;
    for size in sizes {
        debug!("measuring {size} bytes");
        for _ in 0..args.repeats {
            for method in extend::METHODS {
                match method.measure(size) {
                    Ok(elapsed) => {
                        out.write(&Measurement::new(size as u64, method.name(), elapsed))?;
                        rows += 1;
                    }
                    Err(e) => warn!("{} at {size} bytes skipped: {e}", method.name()),
                }
            }
        }
    }
    out.flush()?;

    info!("wrote {rows} samples to {}", args.output.display());
    Ok(())
}

fn sizes(min_shift: u32, max_shift: u32) -> Result<Vec<usize>> {
    if min_shift > max_shift {
        bail!("min-shift ({min_shift}) is larger than max-shift ({max_shift})");
    }
    // Extending doubles the buffer, so the largest one must still double in range.
    if max_shift >= usize::BITS - 1 {
        bail!("max-shift {max_shift} is too large for this platform");
    }
    Ok((min_shift..=max_shift).map(|s| 1usize << s).collect())
}
