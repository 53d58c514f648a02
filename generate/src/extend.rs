use std::io;
use std::time::Instant;

#[cfg(target_os = "linux")]
pub const MREMAP_SUPPORTED: bool = true;
#[cfg(not(target_os = "linux"))]
pub const MREMAP_SUPPORTED: bool = false;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Memcpy,
    Mremap,
}

#[cfg(target_os = "linux")]
pub const METHODS: &[Method] = &[Method::Memcpy, Method::Mremap];
#[cfg(not(target_os = "linux"))]
pub const METHODS: &[Method] = &[Method::Memcpy];

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::Memcpy => "memcpy",
            Method::Mremap => "mremap",
        }
    }

    /// Nanoseconds spent growing a touched `size`-byte buffer to `2 * size`.
    pub fn measure(self, size: usize) -> io::Result<u64> {
        match self {
            Method::Memcpy => Ok(memcpy_extend(size)),
            Method::Mremap => mremap_extend(size),
        }
    }
}

/// Allocate the larger buffer, copy, release the old one. Only the
/// allocate-copy-free sequence is timed.
fn memcpy_extend(size: usize) -> u64 {
    let old = touched_buffer(size);

    let start = Instant::now();
    let mut new = Vec::with_capacity(size * 2);
    new.extend_from_slice(&old);
    drop(old);
    let elapsed = start.elapsed();

    std::hint::black_box(&new);
    elapsed.as_nanos() as u64
}

/// A zeroed buffer whose pages have all been written. `vec![0; n]` would hand
/// back untouched zero pages, so the allocation escapes before the fill.
fn touched_buffer(size: usize) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::with_capacity(size);
    std::hint::black_box(&mut buf);
    buf.resize(size, 0);
    buf
}

#[cfg(target_os = "linux")]
fn mremap_extend(size: usize) -> io::Result<u64> {
    use memmap2::{MmapOptions, RemapOptions};

    let mut map = MmapOptions::new().len(size).map_anon()?;
    map.fill(0);

    let start = Instant::now();
    // SAFETY: the mapping is anonymous and owned here; no slice into it outlives the remap.
    unsafe { map.remap(size * 2, RemapOptions::new().may_move(true))? };
    let elapsed = start.elapsed();

    std::hint::black_box(&map);
    Ok(elapsed.as_nanos() as u64)
}

#[cfg(not(target_os = "linux"))]
fn mremap_extend(_size: usize) -> io::Result<u64> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "mremap is linux-only"))
}
