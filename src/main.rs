use anyhow::{Context, Result, bail};
use chart::Variant;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Plots extend latency against buffer size, one line per method.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV with `size`, `method` and `ns` columns.
    #[arg(default_value = "result.csv")]
    input: PathBuf,

    #[arg(long, default_value = "result.png")]
    output: PathBuf,

    /// `detailed` (base-2 axis, byte-unit ticks, legend, 150 dpi) or `plain`.
    #[arg(long, default_value_t = Variant::Detailed)]
    variant: Variant,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    if args.output.as_os_str().is_empty() {
        bail!("Output path is empty");
    }

    let set = series::load(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    info!(
        "loaded {} points across {} methods from {}",
        set.point_count(),
        set.len(),
        args.input.display()
    );

    chart::render(&set, &args.output, args.variant)
        .with_context(|| format!("failed to render {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use series::SeriesError;
    use std::fs;

    fn args(dir: &std::path::Path, csv: &str) -> Args {
        let input = dir.join("result.csv");
        fs::write(&input, csv).unwrap();
        Args {
            input,
            output: dir.join("result.png"),
            variant: Variant::Detailed,
        }
    }

    #[test]
    fn test_defaults() {
        let a = Args::try_parse_from(["extendplot"]).unwrap();
        assert_eq!(a.input, PathBuf::from("result.csv"));
        assert_eq!(a.output, PathBuf::from("result.png"));
        assert_eq!(a.variant, Variant::Detailed);

        let a = Args::try_parse_from(["extendplot", "bench.csv", "--variant", "plain"]).unwrap();
        assert_eq!(a.input, PathBuf::from("bench.csv"));
        assert_eq!(a.variant, Variant::Plain);

        assert!(Args::try_parse_from(["extendplot", "--variant", "3d"]).is_err());
    }

    #[test]
    fn test_bad_size_leaves_no_image() {
        let dir = tempfile::tempdir().unwrap();
        let a = args(dir.path(), "size,method,ns\nabc,memcpy,120\n");

        let err = run(&a).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SeriesError>(),
            Some(SeriesError::MalformedRow { line: 2, .. })
        ));
        assert!(!a.output.exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let a = Args {
            input: dir.path().join("nope.csv"),
            output: dir.path().join("result.png"),
            variant: Variant::Plain,
        };

        let err = run(&a).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SeriesError>(),
            Some(SeriesError::InputNotFound { .. })
        ));
        assert!(!a.output.exists());
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let a = args(dir.path(), "size,method,ns\n");

        let err = run(&a).unwrap_err();
        assert!(err.downcast_ref::<chart::RenderError>().is_some(), "{err:#}");
        assert!(!a.output.exists());
    }
}
