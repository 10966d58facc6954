//! Character palettes
//!
//! A palette is an ordered ramp of characters. The built-in ramps list their
//! visually dense glyphs first; [`Palette::oriented`] flips the ramp for a black
//! background so the brightest source pixels get the densest glyphs.

use std::fmt;
use std::str::FromStr;

use crate::config::Background;
use crate::error::{AsciiError, Result};
use crate::quantize::{QuantizeMode, char_for, rgb_index};

/// Classic long ramp, dense to sparse, with a run of trailing blanks
pub const FULL_RAMP: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'.      ";

/// Short ramp with a heavy `H`
pub const DENSE_RAMP: &str = "$#H&@*+;:-,. ";

/// The common ten level ramp
pub const CLASSIC_RAMP: &str = "@%#*+=-:.  ";

/// Bold letters first
pub const HEAVY_RAMP: &str = "BS#@$%*!:.  ";

/// Letters and symbols mixed
pub const MIXED_RAMP: &str = "WB#@$\\%wx*i!;:,.  ";

/// The built-in palettes, selectable by index (`0..=4`) or by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuiltinPalette {
    Full,
    Dense,
    Classic,
    #[default]
    Heavy,
    Mixed,
}

impl BuiltinPalette {
    pub const ALL: [BuiltinPalette; 5] = [
        BuiltinPalette::Full,
        BuiltinPalette::Dense,
        BuiltinPalette::Classic,
        BuiltinPalette::Heavy,
        BuiltinPalette::Mixed,
    ];

    /// The ramp string for this palette
    pub fn ramp(self) -> &'static str {
        match self {
            BuiltinPalette::Full => FULL_RAMP,
            BuiltinPalette::Dense => DENSE_RAMP,
            BuiltinPalette::Classic => CLASSIC_RAMP,
            BuiltinPalette::Heavy => HEAVY_RAMP,
            BuiltinPalette::Mixed => MIXED_RAMP,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinPalette::Full => "full",
            BuiltinPalette::Dense => "dense",
            BuiltinPalette::Classic => "classic",
            BuiltinPalette::Heavy => "heavy",
            BuiltinPalette::Mixed => "mixed",
        }
    }
}

impl TryFrom<usize> for BuiltinPalette {
    type Error = AsciiError;

    fn try_from(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            AsciiError::Validation(format!(
                "palette index must be between 0 and {}, got {index}",
                Self::ALL.len() - 1
            ))
        })
    }
}

impl FromStr for BuiltinPalette {
    type Err = AsciiError;

    /// Accepts an index (`"3"`) or a case-insensitive name (`"heavy"`)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::try_from(index);
        }
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AsciiError::Validation(format!("unknown palette '{s}'")))
    }
}

impl fmt::Display for BuiltinPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, non-empty sequence of characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    chars: Vec<char>,
}

impl Palette {
    /// Build a palette from an arbitrary string of characters
    ///
    /// # Errors
    /// Returns a validation error for an empty string
    pub fn new(ramp: &str) -> Result<Self> {
        let chars: Vec<char> = ramp.chars().collect();
        if chars.is_empty() {
            return Err(AsciiError::Validation("palette must not be empty".into()));
        }
        Ok(Self { chars })
    }

    pub fn builtin(palette: BuiltinPalette) -> Self {
        Self {
            chars: palette.ramp().chars().collect(),
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Lookup order for a background mode
    ///
    /// Black backgrounds use the reversed ramp, white backgrounds the ramp as given.
    pub fn oriented(&self, background: Background) -> Self {
        match background {
            Background::White => self.clone(),
            Background::Black => Self {
                chars: self.chars.iter().rev().copied().collect(),
            },
        }
    }

    /// Character for a brightness value, in this palette's own order
    pub fn char_for(&self, brightness: u8, mode: QuantizeMode) -> char {
        char_for(brightness, &self.chars, mode)
    }

    /// Character for the mean brightness of an RGB cell
    pub fn char_for_rgb(&self, rgb: [u8; 3], mode: QuantizeMode) -> char {
        self.chars[rgb_index(rgb, self.chars.len(), mode)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::builtin(BuiltinPalette::default())
    }
}

impl From<BuiltinPalette> for Palette {
    fn from(palette: BuiltinPalette) -> Self {
        Self::builtin(palette)
    }
}
