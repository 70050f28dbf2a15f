//! Font access and outline geometry
//!
//! Handles:
//! - TTF/OTF parsing and unhinted outline loading (freetype)
//! - Outline comparison within a tolerance
//! - The `GlyphSource` seam the matcher is written against

pub mod freetype;
pub mod outline;
pub mod source;

pub use freetype::{FontFace, FontHandle, HintingMode};
pub use outline::{outlines_equal, BoundingBox, GlyphBounds, GlyphOutline, Point};
pub use source::{GlyphSource, SourceProvider};
