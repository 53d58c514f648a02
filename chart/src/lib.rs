mod layout;

use layout::{Figure, Plot};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use series::{SeriesSet, tick_label};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub const TITLE: &str = "memcpy vs. mremap - extend latency";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("nothing to plot: no measurement with a positive size")]
    NoData,
    #[error("failed to draw chart: {0}")]
    Draw(String),
    #[error("failed to save chart: {0}")]
    Save(#[from] image::ImageError),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(e.to_string())
    }
}

/// Chart flavours. `Detailed` is a base-2 axis labelled in byte units with a
/// title and legend; `Plain` is a bare base-10 log axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Detailed,
    Plain,
}

impl Variant {
    fn style(self) -> Style {
        match self {
            Variant::Detailed => Style {
                base: 2.0,
                x_desc: "size",
                title: Some(TITLE),
                legend: true,
                byte_ticks: true,
                dpi: 150,
            },
            Variant::Plain => Style {
                base: 10.0,
                x_desc: "size (bytes)",
                title: None,
                legend: false,
                byte_ticks: false,
                dpi: 100,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Detailed => "detailed",
            Variant::Plain => "plain",
        })
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "detailed" => Ok(Variant::Detailed),
            "plain" => Ok(Variant::Plain),
            other => Err(format!("unknown variant `{other}`, expected `detailed` or `plain`")),
        }
    }
}

struct Style {
    base: f64,
    x_desc: &'static str,
    title: Option<&'static str>,
    legend: bool,
    byte_ticks: bool,
    dpi: u32,
}

const Y_DESC: &str = "extend time (ns)";

/// Draws one line per series into a PNG at `path`, replacing any existing file.
/// Nothing is written unless the whole chart was drawn.
pub fn render(
    set: &SeriesSet,
    path: impl AsRef<Path>,
    variant: Variant,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let style = variant.style();
    let figure = Figure::at_dpi(style.dpi);
    let plot = Plot::prepare(set, style.base)?;

    write_png(path, &figure, |root| draw(root, plot, &style, &figure))?;

    info!(
        "wrote {} chart of {} series to {}",
        variant,
        set.len(),
        path.display()
    );
    Ok(())
}

/// Paints into an in-memory canvas and encodes it to `path` once `paint` succeeds.
fn write_png<F>(path: &Path, figure: &Figure, paint: F) -> Result<(), RenderError>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<(), RenderError>,
{
    let (width, height) = figure.pixels();
    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        paint(&root)?;
        root.present()?;
    }

    let img = image::RgbImage::from_raw(width, height, buf)
        .ok_or_else(|| RenderError::Draw("canvas size does not match the figure".to_string()))?;
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Sizes and nanoseconds are integers; ticks print without decimals.
fn whole_label(value: f64) -> String {
    format!("{value:.0}")
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: Plot,
    style: &Style,
    figure: &Figure,
) -> Result<(), RenderError> {
    let (x_lo, x_hi) = plot.x_range;
    debug!("x axis {x_lo}..{x_hi} (base {}), y axis 0..{}", style.base, plot.y_top);

    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(figure.px(12))
        .x_label_area_size(figure.px(40))
        .y_label_area_size(figure.px(60));
    if let Some(title) = style.title {
        builder.caption(title, ("sans-serif", figure.font(18.0)).into_font());
    }
    let mut chart = builder.build_cartesian_2d(
        (x_lo..x_hi).log_scale().base(style.base),
        0f64..plot.y_top,
    )?;

    let bytes = |v: &f64| tick_label(*v);
    let whole = |v: &f64| whole_label(*v);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(style.x_desc)
        .y_desc(Y_DESC)
        .y_label_formatter(&whole)
        .label_style(("sans-serif", figure.font(12.0)))
        .axis_desc_style(("sans-serif", figure.font(14.0)));
    if style.byte_ticks {
        mesh.x_label_formatter(&bytes);
    } else {
        mesh.x_label_formatter(&whole);
    }
    mesh.draw()?;

    let stroke = figure.px(2);
    let radius = figure.px(3);
    for (idx, (method, pts)) in plot.lines.into_iter().enumerate() {
        let color = Palette99::pick(idx).mix(1.0);
        let anno = chart.draw_series(LineSeries::new(pts.clone(), color.stroke_width(stroke)))?;
        if style.legend {
            anno.label(method).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        }
        chart.draw_series(pts.into_iter().map(|p| Circle::new(p, radius, color.filled())))?;
    }

    if style.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(("sans-serif", figure.font(12.0)))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use series::Measurement;

    #[test]
    fn test_variant_round_trip_through_str() {
        for v in [Variant::Detailed, Variant::Plain] {
            assert_eq!(v.to_string().parse::<Variant>().unwrap(), v);
        }
        assert!("fancy".parse::<Variant>().is_err());
        assert_eq!(Variant::default(), Variant::Detailed);
    }

    #[test]
    fn test_detailed_style() {
        let s = Variant::Detailed.style();
        assert_eq!(s.base, 2.0);
        assert_eq!(s.dpi, 150);
        assert_eq!(s.title, Some(TITLE));
        assert!(s.legend && s.byte_ticks);
        assert_eq!(s.x_desc, "size");
    }

    #[test]
    fn test_plain_style() {
        let s = Variant::Plain.style();
        assert_eq!(s.base, 10.0);
        assert_eq!(s.dpi, 100);
        assert_eq!(s.title, None);
        assert!(!s.legend && !s.byte_ticks);
        assert_eq!(s.x_desc, "size (bytes)");
    }

    #[test]
    fn test_no_drawable_points() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("result.png");

        let empty = SeriesSet::from_measurements(Vec::new());
        assert!(matches!(render(&empty, &out, Variant::Detailed), Err(RenderError::NoData)));

        let zeros = SeriesSet::from_measurements(vec![Measurement::new(0, "memcpy", 10)]);
        assert!(matches!(render(&zeros, &out, Variant::Plain), Err(RenderError::NoData)));
        assert!(!out.exists());
    }

    // Text layout needs a system sans-serif font.
    #[test]
    #[ignore]
    fn test_render_png() {
        let dir = tempfile::tempdir().unwrap();
        let set = SeriesSet::from_measurements(vec![
            Measurement::new(4096, "memcpy", 120),
            Measurement::new(8192, "memcpy", 200),
            Measurement::new(4096, "mremap", 50),
        ]);
        for variant in [Variant::Detailed, Variant::Plain] {
            let out = dir.path().join(format!("{variant}.png"));
            render(&set, &out, variant).unwrap();
            assert!(std::fs::metadata(&out).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_whole_label() {
        assert_eq!(whole_label(2500.0), "2500");
        assert_eq!(whole_label(1_000_000.0), "1000000");
        assert_eq!(whole_label(0.0), "0");
    }

    #[test]
    fn test_failed_paint_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("result.png");
        std::fs::write(&out, b"previous chart").unwrap();

        let err = write_png(&out, &Figure::at_dpi(100), |root| {
            root.fill(&WHITE)?;
            Err(RenderError::Draw("font missing".to_string()))
        });

        assert!(matches!(err, Err(RenderError::Draw(_))));
        assert_eq!(std::fs::read(&out).unwrap(), b"previous chart");
    }

    #[test]
    fn test_failed_paint_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("result.png");

        let err = write_png(&out, &Figure::at_dpi(150), |_| {
            Err(RenderError::Draw("font missing".to_string()))
        });

        assert!(err.is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_successful_paint_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("result.png");

        write_png(&out, &Figure::at_dpi(150), |root| {
            root.fill(&WHITE)?;
            Ok(())
        })
        .unwrap();

        let img = image::open(&out).unwrap();
        assert_eq!((img.width(), img.height()), (960, 720));
    }

    #[test]
    fn test_unwritable_output() {
        let set = SeriesSet::from_measurements(vec![Measurement::new(4096, "memcpy", 120)]);
        let err = render(&set, "/definitely/not/a/dir/result.png", Variant::Plain);
        assert!(err.is_err());
    }
}
