//! Outline provider seam
//!
//! The matcher only talks to fonts through these traits. `FontFace`
//! (FreeType) is the production implementation; tests plug in
//! in-memory fonts.

use crate::constants::Codepoint;
use crate::error::FontError;
use crate::font::freetype::HintingMode;
use crate::font::outline::{GlyphBounds, GlyphOutline};

/// A font that can answer glyph queries
pub trait GlyphSource {
    /// Glyph index for a codepoint (0 = no cmap entry)
    fn glyph_index(&self, cp: Codepoint) -> u32;

    /// Bounds and advance at `size` pixels, `None` if the glyph cannot be loaded
    fn glyph_bounds(&self, cp: Codepoint, size: u32) -> Option<GlyphBounds>;

    /// Load the outline of `glyph_index` at `size` pixels
    fn load_outline(
        &self,
        size: u32,
        glyph_index: u32,
        hinting: HintingMode,
    ) -> Result<GlyphOutline, FontError>;
}

/// Shared, read-only font that hands out per-worker sources
///
/// Sources are not required to be `Send`; each worker opens its own.
pub trait SourceProvider: Sync {
    type Source: GlyphSource;

    fn open(&self) -> Result<Self::Source, FontError>;
}
