//! Error types for glyphmap

use thiserror::Error;

/// Failures reported by the FreeType layer
#[derive(Error, Debug)]
pub enum FontError {
    #[error("FreeType initialization failed: {0}")]
    Init(String),

    #[error("font parse failed: {0}")]
    Parse(String),

    #[error("FreeType size setting failed ({size}px): {reason}")]
    Size { size: u32, reason: String },

    #[error("glyph {glyph_index} load failed: {reason}")]
    Outline { glyph_index: u32, reason: String },

    #[error("glyph {glyph_index} has no vector outline")]
    NotOutline { glyph_index: u32 },
}

/// Mapper construction errors, naming the font that failed
#[derive(Error, Debug)]
pub enum MapperError {
    #[error("parse special font failed: {0}")]
    SpecialFont(#[source] FontError),

    #[error("parse standard font failed: {0}")]
    StandardFont(#[source] FontError),
}
