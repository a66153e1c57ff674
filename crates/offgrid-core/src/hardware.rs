//! Hardware margin seam.
//!
//! The budgeting engine treats the hardware margin as an opaque pure
//! function of the pre-margin image size, supplied by whoever knows the
//! target media (SD card vendor quirks, USB keys, ...).

use offgrid_schema::ONE_MIB;

/// Vendor/media-specific slack added on top of the computed image size.
pub trait HardwareMargin {
    /// Margin for an image of `size_so_far` bytes. `size_so_far` is the
    /// subtotal *before* this margin, never a self-referential total.
    fn margin(&self, size_so_far: u64) -> u64;
}

/// No slack at all. Useful for tests and for targets with exact capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMargin;

impl HardwareMargin for NoMargin {
    fn margin(&self, _size_so_far: u64) -> u64 {
        0
    }
}

/// Rounds the image size up to the next media block boundary (512 MiB),
/// the granularity physical SD cards and flashing tools work in.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaAlignMargin;

impl MediaAlignMargin {
    const BOUNDARY: u64 = 512 * ONE_MIB;
}

impl HardwareMargin for MediaAlignMargin {
    fn margin(&self, size_so_far: u64) -> u64 {
        let rem = size_so_far % Self::BOUNDARY;
        if rem == 0 {
            0
        } else {
            Self::BOUNDARY - rem
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_margin_is_zero_everywhere() {
        assert_eq!(NoMargin.margin(0), 0);
        assert_eq!(NoMargin.margin(u64::MAX), 0);
    }

    #[test]
    fn media_align_rounds_up_to_boundary() {
        let boundary = 512 * ONE_MIB;
        assert_eq!(MediaAlignMargin.margin(boundary), 0);
        assert_eq!(MediaAlignMargin.margin(boundary + 1), boundary - 1);
        assert_eq!(MediaAlignMargin.margin(1), boundary - 1);
        assert_eq!(MediaAlignMargin.margin(3 * boundary), 0);
    }

    #[test]
    fn aligned_total_lands_on_boundary() {
        let size = 7_340_000_001;
        let total = size + MediaAlignMargin.margin(size);
        assert_eq!(total % (512 * ONE_MIB), 0);
    }
}
