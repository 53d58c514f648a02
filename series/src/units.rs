use crate::error::UnitError;

pub const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

const STEP: f64 = 1024.0;

/// Formats a byte count with binary units: `4096.0` is `"4 KiB"`, `1536.0` is `"1.5 KiB"`.
///
/// Whole scaled values get no decimals, anything else gets one. Zero is the bare `"0"`.
/// Values past the last unit stay in TiB, so `1024^5` prints as `"1024 TiB"`.
pub fn human_bytes(value: f64) -> Result<String, UnitError> {
    if !value.is_finite() || value < 0.0 {
        return Err(UnitError::OutOfDomain(value));
    }
    if value == 0.0 {
        return Ok("0".to_string());
    }

    // Dividing instead of taking log_1024 keeps exact powers from rounding down a unit.
    let mut scaled = value;
    let mut k = 0;
    while scaled >= STEP && k + 1 < UNITS.len() {
        scaled /= STEP;
        k += 1;
    }

    let txt = if scaled.fract() == 0.0 {
        format!("{scaled:.0}")
    } else {
        format!("{scaled:.1}")
    };
    Ok(format!("{txt} {}", UNITS[k]))
}

/// Axis callback: labels a tick position, leaving ticks outside the byte domain blank.
pub fn tick_label(value: f64) -> String {
    human_bytes(value).unwrap_or_default()
}
