//! Brightness to palette index mapping
//!
//! A brightness value in `0..=255` is scaled linearly onto the indices of a
//! palette of length `L`, so `0` lands on index `0` and `255` lands on `L - 1`.

/// How a brightness value is scaled onto palette indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantizeMode {
    /// Exact integer scaling: `b * (L - 1) / 255`
    #[default]
    Floor,
    /// Float scaling in the legacy operation order:
    /// `round(floor(b / 255.0 * (L - 1)))`.
    ///
    /// Kept for bit-exact parity with images produced by older renders.
    Legacy,
}

/// Map a brightness value to a palette index
///
/// # Arguments
/// * `brightness` - Grayscale value [0, 255]
/// * `len` - Palette length
/// * `mode` - Scaling formula
///
/// # Returns
/// An index in `[0, len - 1]`, or `0` for palettes shorter than two characters
pub fn palette_index(brightness: u8, len: usize, mode: QuantizeMode) -> usize {
    if len < 2 {
        return 0;
    }
    let steps = len - 1;

    let index = match mode {
        QuantizeMode::Floor => usize::from(brightness) * steps / 255,
        QuantizeMode::Legacy => {
            let scaled = f64::from(brightness) / 255.0 * steps as f64;
            scaled.floor().round() as usize
        }
    };

    index.min(steps)
}

/// Map the mean of an RGB triple to a palette index
///
/// Same scaling as [`palette_index`] applied to `(r + g + b) / 3` without
/// rounding the mean first, so `Floor` is `(r + g + b) * (L - 1) / 765`.
pub fn rgb_index(rgb: [u8; 3], len: usize, mode: QuantizeMode) -> usize {
    if len < 2 {
        return 0;
    }
    let steps = len - 1;
    let sum: usize = rgb.iter().map(|&c| usize::from(c)).sum();

    let index = match mode {
        QuantizeMode::Floor => sum * steps / 765,
        QuantizeMode::Legacy => {
            let scaled = sum as f64 / 3.0 / 255.0 * steps as f64;
            scaled.floor().round() as usize
        }
    };

    index.min(steps)
}

/// Map a brightness value to a character of `palette`
///
/// `palette` must not be empty.
pub fn char_for(brightness: u8, palette: &[char], mode: QuantizeMode) -> char {
    palette[palette_index(brightness, palette.len(), mode)]
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [QuantizeMode; 2] = [QuantizeMode::Floor, QuantizeMode::Legacy];

    #[test]
    fn test_extremes_hit_first_and_last() {
        for mode in MODES {
            for len in 1..=80 {
                assert_eq!(palette_index(0, len, mode), 0);
                assert_eq!(palette_index(255, len, mode), len.saturating_sub(1));
            }
        }
    }

    #[test]
    fn test_monotonic_and_in_range() {
        for mode in MODES {
            for len in [1, 2, 3, 10, 12, 13, 18, 70, 256, 300] {
                let mut previous = 0;
                for b in 0..=255u8 {
                    let index = palette_index(b, len, mode);
                    assert!(index < len.max(1), "index {index} out of range for len {len}");
                    assert!(index >= previous, "not monotonic at b={b}, len={len}");
                    previous = index;
                }
            }
        }
    }

    #[test]
    fn test_two_char_palette_splits_at_top() {
        // Only full brightness reaches the second character
        assert_eq!(palette_index(254, 2, QuantizeMode::Floor), 0);
        assert_eq!(palette_index(255, 2, QuantizeMode::Floor), 1);
    }

    #[test]
    fn test_legacy_keeps_float_rounding() {
        // 155 * 51 / 255 is exactly 31, the float path lands just below it
        assert_eq!(palette_index(155, 52, QuantizeMode::Floor), 31);
        assert_eq!(palette_index(155, 52, QuantizeMode::Legacy), 30);
    }

    #[test]
    fn test_char_for() {
        let palette = ['a', 'b', 'c'];
        assert_eq!(char_for(0, &palette, QuantizeMode::Floor), 'a');
        assert_eq!(char_for(128, &palette, QuantizeMode::Floor), 'b');
        assert_eq!(char_for(255, &palette, QuantizeMode::Floor), 'c');
    }

    #[test]
    fn test_rgb_index_keeps_fractional_mean() {
        // mean 127.67: truncating to 127 first would pick index 0
        assert_eq!(rgb_index([128, 128, 127], 3, QuantizeMode::Floor), 1);
        assert_eq!(rgb_index([128, 128, 127], 3, QuantizeMode::Legacy), 1);
        assert_eq!(palette_index(127, 3, QuantizeMode::Floor), 0);

        for mode in MODES {
            assert_eq!(rgb_index([0, 0, 0], 10, mode), 0);
            assert_eq!(rgb_index([255, 255, 255], 10, mode), 9);
            assert_eq!(rgb_index([200, 10, 90], 1, mode), 0);
        }
    }
}
