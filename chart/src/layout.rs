use crate::RenderError;
use series::SeriesSet;

const WIDTH_IN: f64 = 6.4;
const HEIGHT_IN: f64 = 4.8;
const BASE_DPI: f64 = 100.0;

/// Canvas of a fixed physical size; pixel and font sizes follow the resolution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Figure {
    dpi: u32,
}

impl Figure {
    pub(crate) fn at_dpi(dpi: u32) -> Self {
        Self { dpi }
    }

    fn scale(&self) -> f64 {
        self.dpi as f64 / BASE_DPI
    }

    pub(crate) fn pixels(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        ((WIDTH_IN * dpi).round() as u32, (HEIGHT_IN * dpi).round() as u32)
    }

    /// Scales a length given in pixels at 100 dpi.
    pub(crate) fn px(&self, base: u32) -> u32 {
        (base as f64 * self.scale()).round() as u32
    }

    pub(crate) fn font(&self, base: f64) -> f64 {
        base * self.scale()
    }
}

/// Points ready for a log x-axis, with the axis extents.
#[derive(Debug)]
pub(crate) struct Plot {
    pub(crate) lines: Vec<(String, Vec<(f64, f64)>)>,
    pub(crate) x_range: (f64, f64),
    pub(crate) y_top: f64,
}

impl Plot {
    /// Zero sizes cannot sit on a log axis and are left out; a set with
    /// nothing else is `NoData`.
    pub(crate) fn prepare(set: &SeriesSet, base: f64) -> Result<Self, RenderError> {
        let lines: Vec<(String, Vec<(f64, f64)>)> = set
            .iter()
            .map(|s| {
                let pts = s
                    .points
                    .iter()
                    .filter(|&&(size, _)| size > 0)
                    .map(|&(size, ns)| (size as f64, ns as f64))
                    .collect::<Vec<_>>();
                (s.method.to_string(), pts)
            })
            .filter(|(_, pts)| !pts.is_empty())
            .collect();

        let mut xs = lines.iter().flat_map(|(_, pts)| pts.iter().map(|&(x, _)| x));
        let first = xs.next().ok_or(RenderError::NoData)?;
        let (lo, hi) = xs.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x)));
        let max_ns = lines
            .iter()
            .flat_map(|(_, pts)| pts.iter().map(|&(_, y)| y))
            .fold(0.0, f64::max);

        Ok(Self {
            lines,
            x_range: log_bounds(lo, hi, base),
            y_top: y_top(max_ns),
        })
    }
}

/// Widens `[lo, hi]` outward to whole powers of `base`. Expects `lo >= 1`.
pub(crate) fn log_bounds(lo: f64, hi: f64, base: f64) -> (f64, f64) {
    let mut start = 1.0;
    while start * base <= lo {
        start *= base;
    }
    let mut end = start * base;
    while end < hi {
        end *= base;
    }
    (start, end)
}

/// Linear y-axis top: 5% headroom over the slowest sample.
pub(crate) fn y_top(max_ns: f64) -> f64 {
    if max_ns > 0.0 { max_ns * 1.05 } else { 1.0 }
}
