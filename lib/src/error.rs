use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while turning an image into ASCII tiles.
///
/// Every variant is fatal for the run: nothing is retried and no partial
/// output is kept.
#[derive(Error, Debug)]
pub enum AsciiError {
    /// A configuration value is out of range or malformed.
    #[error("invalid configuration: {0}")]
    Validation(String),

    /// The source image path does not resolve to a file.
    #[error("source image not found: {}", path.display())]
    SourceNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The source image exists but could not be read or decoded.
    #[error("failed to decode source image {}", path.display())]
    Decode {
        /// Path of the source image.
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The font resource is missing or is not a usable TrueType/OpenType font.
    #[error("failed to load font {}: {reason}", path.display())]
    FontLoad {
        /// Path of the font file.
        path: PathBuf,
        /// Human readable cause.
        reason: String,
    },

    /// The output image could not be encoded or written.
    #[error("failed to write output image {}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, AsciiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let err = AsciiError::SourceNotFound {
            path: PathBuf::from("input/cat.jpg"),
        };
        assert_eq!(err.to_string(), "source image not found: input/cat.jpg");

        let err = AsciiError::FontLoad {
            path: PathBuf::from("mono.ttf"),
            reason: "no such file".into(),
        };
        assert_eq!(err.to_string(), "failed to load font mono.ttf: no such file");
    }
}
