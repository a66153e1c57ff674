//! Byte-size units and human-readable formatting.

/// One mebibyte.
pub const ONE_MIB: u64 = 1 << 20;

/// One gibibyte.
pub const ONE_GIB: u64 = 1 << 30;

/// Format a byte count for human display (binary units, one decimal).
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_counts_stay_in_bytes() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
    }

    #[test]
    fn binary_units_scale() {
        assert_eq!(human_size(ONE_MIB), "1.0 MiB");
        assert_eq!(human_size(512 * ONE_MIB), "512.0 MiB");
        assert_eq!(human_size(ONE_GIB), "1.0 GiB");
        assert_eq!(human_size(ONE_GIB + ONE_GIB / 2), "1.5 GiB");
    }
}
