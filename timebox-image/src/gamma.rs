//! Gamma mapping from 8-bit source intensities to 4-bit device intensities.

use timebox_core::{Result, TimeboxError};

use crate::canvas::Rgb;

/// Precomputed `0..=255 -> 0..=15` intensity curve for one gamma value.
///
/// Entry `k` is `floor(255 * (k / 256) ^ (1 / gamma)) >> 4`.
#[derive(Debug, Clone, PartialEq)]
pub struct GammaTable {
    /// The gamma value the table was computed for.
    gamma: f64,
    /// Device intensity per raw intensity.
    table: [u8; 256],
}

impl GammaTable {
    /// Compute the table for `gamma`, which must be finite and positive.
    pub fn new(gamma: f64) -> Result<Self> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(TimeboxError::invalid_argument(format!(
                "gamma must be finite and positive, got {gamma}"
            )));
        }
        Ok(Self::compute(gamma))
    }

    fn compute(gamma: f64) -> Self {
        let exponent = 1.0 / gamma;
        let mut table = [0u8; 256];
        for (k, slot) in table.iter_mut().enumerate() {
            let scaled = 255.0 * (k as f64 / 256.0).powf(exponent);
            *slot = ((scaled as u32) >> 4) as u8;
        }
        Self { gamma, table }
    }

    /// The gamma value of this table.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Map one raw intensity.
    #[inline]
    pub fn map(&self, raw: u8) -> u8 {
        self.table[usize::from(raw)]
    }

    /// Map all three channels of a color.
    pub fn map_rgb(&self, [r, g, b]: Rgb) -> Rgb {
        [self.map(r), self.map(g), self.map(b)]
    }

    /// The full table.
    pub fn entries(&self) -> &[u8; 256] {
        &self.table
    }
}

impl Default for GammaTable {
    /// The linear curve (`gamma = 1.0`).
    fn default() -> Self {
        Self::compute(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_curve() {
        let table = GammaTable::default();
        assert_eq!(table.map(0), 0);
        assert_eq!(table.map(16), 0);
        assert_eq!(table.map(17), 1);
        assert_eq!(table.map(128), 7);
        assert_eq!(table.map(255), 15);
    }

    #[test]
    fn test_curve_shapes() {
        assert_eq!(GammaTable::new(0.5).unwrap().map(128), 3);
        assert_eq!(GammaTable::new(0.6).unwrap().map(128), 5);
        assert_eq!(GammaTable::new(2.0).unwrap().map(128), 11);
        assert_eq!(GammaTable::new(2.0).unwrap().map(1), 0);
    }

    #[test]
    fn test_output_is_four_bit() {
        for gamma in [0.1, 0.4, 1.0, 2.2, 10.0] {
            let table = GammaTable::new(gamma).unwrap();
            assert!(table.entries().iter().all(|&v| v <= 15));
            assert_eq!(table.map(0), 0);
        }
    }

    #[test]
    fn test_recompute_is_identical() {
        let a = GammaTable::new(0.4).unwrap();
        let b = GammaTable::new(0.4).unwrap();
        assert_eq!(a.entries(), b.entries());
    }

    #[test]
    fn test_invalid_gamma() {
        assert!(GammaTable::new(0.0).is_err());
        assert!(GammaTable::new(-1.0).is_err());
        assert!(GammaTable::new(f64::NAN).is_err());
        assert!(GammaTable::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_map_rgb() {
        let table = GammaTable::default();
        assert_eq!(table.map_rgb([255, 128, 0]), [15, 7, 0]);
    }
}
