use crate::record::Measurement;
use ahash::AHashMap;
use std::fmt;

/// All measurements of one method, ordered by size. Borrowed from a [`SeriesSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Series<'a> {
    pub method: &'a str,
    pub points: &'a [(u64, u64)],
}

impl<'a> Series<'a> {
    pub fn sizes(&self) -> impl Iterator<Item = u64> + 'a {
        self.points.iter().map(|&(size, _)| size)
    }

    pub fn elapsed(&self) -> impl Iterator<Item = u64> + 'a {
        self.points.iter().map(|&(_, ns)| ns)
    }
}

#[derive(Debug, Default)]
pub struct SeriesSet {
    by_method: AHashMap<String, Vec<(u64, u64)>>,
}

impl SeriesSet {
    /// Groups rows by method in one pass, then sorts each group by size.
    /// Rows sharing a size keep their input order.
    pub fn from_measurements<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Measurement>,
    {
        let mut by_method: AHashMap<String, Vec<(u64, u64)>> = AHashMap::new();
        for row in rows {
            by_method
                .entry(row.method)
                .or_default()
                .push((row.size, row.elapsed));
        }

        for points in by_method.values_mut() {
            points.sort_by_key(|&(size, _)| size);
        }

        Self { by_method }
    }

    pub fn len(&self) -> usize {
        self.by_method.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_method.is_empty()
    }

    pub fn get(&self, method: &str) -> Option<&[(u64, u64)]> {
        self.by_method.get(method).map(Vec::as_slice)
    }

    /// Series in method-name order.
    pub fn iter(&self) -> impl Iterator<Item = Series<'_>> {
        let mut entries: Vec<_> = self.by_method.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(method, points)| Series {
            method: method.as_str(),
            points: points.as_slice(),
        })
    }

    pub fn point_count(&self) -> usize {
        self.by_method.values().map(Vec::len).sum()
    }

    /// Smallest and largest size across every series.
    pub fn size_bounds(&self) -> Option<(u64, u64)> {
        let mut sizes = self.by_method.values().flatten().map(|&(size, _)| size);
        let first = sizes.next()?;
        Some(sizes.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s))))
    }

    pub fn max_elapsed(&self) -> Option<u64> {
        self.by_method.values().flatten().map(|&(_, ns)| ns).max()
    }
}

impl fmt::Display for SeriesSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for series in self.iter() {
            write!(f, "{}:", series.method)?;
            for (size, ns) in series.points {
                write!(f, " ({size}, {ns})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
