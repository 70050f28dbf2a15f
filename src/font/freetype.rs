//! FreeType wrapper
//!
//! Parses font data and extracts unhinted glyph outlines in 26.6 units.
//!
//! FreeType faces are not thread-safe, so `FontHandle` only keeps the
//! validated bytes and every worker opens its own `FontFace`. All faces
//! borrow the same shared buffer.

use crate::constants::Codepoint;
use crate::error::FontError;
use crate::font::outline::{BoundingBox, GlyphBounds, GlyphOutline, Point};
use crate::font::source::{GlyphSource, SourceProvider};
use freetype::face::LoadFlag;
use freetype::Library;
use log::info;
use std::cell::Cell;
use std::sync::Arc;

/// Hinting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintingMode {
    /// Normal hinting (grid-fitted)
    Normal,
    /// Light hinting (vertical only)
    Light,
    /// No hinting (pure geometry, used for comparison)
    #[default]
    None,
}

impl HintingMode {
    fn to_load_flag(self) -> LoadFlag {
        match self {
            Self::Normal => LoadFlag::DEFAULT,
            Self::Light => LoadFlag::TARGET_LIGHT,
            Self::None => LoadFlag::NO_HINTING,
        }
    }
}

/// Parsed, immutable font data
///
/// Cheap to clone; the bytes are shared.
#[derive(Clone)]
pub struct FontHandle {
    data: Arc<[u8]>,
    face_index: isize,
    family: String,
    num_glyphs: u32,
}

impl FontHandle {
    /// Validate font data with FreeType and keep it for later faces
    pub fn parse(data: &[u8]) -> Result<Self, FontError> {
        Self::parse_index(data, 0)
    }

    /// Same as `parse`, selecting a face inside a collection
    pub fn parse_index(data: &[u8], face_index: isize) -> Result<Self, FontError> {
        let data: Arc<[u8]> = Arc::from(data);
        let face = FontFace::from_bytes(data.clone(), face_index)?;
        let family = face.family_name();
        let num_glyphs = face.num_glyphs();

        info!("Font parsed: {} ({} glyphs)", family, num_glyphs);

        Ok(Self {
            data,
            face_index,
            family,
            num_glyphs,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn num_glyphs(&self) -> u32 {
        self.num_glyphs
    }

    /// Open a transient FreeType face for the calling thread
    pub fn open(&self) -> Result<FontFace, FontError> {
        FontFace::from_bytes(self.data.clone(), self.face_index)
    }
}

impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontHandle")
            .field("family", &self.family)
            .field("num_glyphs", &self.num_glyphs)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl SourceProvider for FontHandle {
    type Source = FontFace;

    fn open(&self) -> Result<FontFace, FontError> {
        FontHandle::open(self)
    }
}

type SharedFace = freetype::Face<Arc<[u8]>>;

/// Face pinned to one pixel size at a time
struct SizedFace {
    face: SharedFace,
    /// Current pixel size (0 = not set yet)
    size_px: Cell<u32>,
}

impl SizedFace {
    fn new(library: &Library, data: Arc<[u8]>, face_index: isize) -> Result<Self, FontError> {
        let face = library
            .new_memory_face2(data, face_index)
            .map_err(|e| FontError::Parse(format!("{:?}", e)))?;
        Ok(Self {
            face,
            size_px: Cell::new(0),
        })
    }

    /// The face at `size_px`, skipping FreeType when already there
    fn at_size(&self, size_px: u32) -> Result<&SharedFace, FontError> {
        if self.size_px.get() != size_px {
            self.face
                .set_pixel_sizes(0, size_px)
                .map_err(|e| FontError::Size {
                    size: size_px,
                    reason: format!("{:?}", e),
                })?;
            self.size_px.set(size_px);
        }
        Ok(&self.face)
    }
}

/// FreeType faces bound to the thread that opened them
///
/// The existence probe and outline loading run at different pixel sizes,
/// so each gets its own face over the same bytes and keeps its size
/// across a whole candidate scan.
pub struct FontFace {
    probe: SizedFace,
    outline: SizedFace,
    _library: Library,
}

impl FontFace {
    /// Load from shared font data (no copy)
    pub fn from_bytes(data: Arc<[u8]>, face_index: isize) -> Result<Self, FontError> {
        let library = Library::init().map_err(|e| FontError::Init(format!("{:?}", e)))?;

        let outline = SizedFace::new(&library, data.clone(), face_index)?;
        if !outline.face.is_scalable() {
            return Err(FontError::Parse("font has no scalable outlines".to_string()));
        }
        let probe = SizedFace::new(&library, data, face_index)?;

        Ok(Self {
            probe,
            outline,
            _library: library,
        })
    }

    pub fn family_name(&self) -> String {
        self.outline
            .face
            .family_name()
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn num_glyphs(&self) -> u32 {
        self.outline.face.num_glyphs() as u32
    }

    /// Pixel sizes currently set on the probe and outline faces (0 = unset)
    pub fn pixel_sizes(&self) -> (u32, u32) {
        (self.probe.size_px.get(), self.outline.size_px.get())
    }
}

impl GlyphSource for FontFace {
    fn glyph_index(&self, cp: Codepoint) -> u32 {
        // get_char_index returns 0 (or None) if not found
        self.outline.face.get_char_index(cp as usize).unwrap_or(0)
    }

    fn glyph_bounds(&self, cp: Codepoint, size: u32) -> Option<GlyphBounds> {
        let face = self.probe.at_size(size).ok()?;

        let load_flags = LoadFlag::NO_BITMAP | HintingMode::None.to_load_flag();
        face.load_char(cp as usize, load_flags).ok()?;

        let metrics = face.glyph().metrics();
        let bearing_x = metrics.horiBearingX as i64;
        let bearing_y = metrics.horiBearingY as i64;

        Some(GlyphBounds {
            bbox: BoundingBox {
                x_min: bearing_x,
                y_min: bearing_y - metrics.height as i64,
                x_max: bearing_x + metrics.width as i64,
                y_max: bearing_y,
            },
            advance: metrics.horiAdvance as i64,
        })
    }

    fn load_outline(
        &self,
        size: u32,
        glyph_index: u32,
        hinting: HintingMode,
    ) -> Result<GlyphOutline, FontError> {
        let face = self.outline.at_size(size)?;

        let load_flags = LoadFlag::NO_BITMAP | hinting.to_load_flag();
        face.load_glyph(glyph_index, load_flags)
            .map_err(|e| FontError::Outline {
                glyph_index,
                reason: format!("{:?}", e),
            })?;

        let glyph = face.glyph();

        // Empty glyphs leave the point buffers unallocated
        if glyph.raw().outline.n_points == 0 {
            return Ok(GlyphOutline::default());
        }

        let outline = glyph
            .outline()
            .ok_or(FontError::NotOutline { glyph_index })?;

        let ends = outline.contours().iter().map(|&end| end as usize).collect();
        let points = outline
            .points()
            .iter()
            .map(|v| Point::new(v.x as i64, v.y as i64))
            .collect();

        Ok(GlyphOutline::new(ends, points))
    }
}

#[cfg(test)]
#[path = "../../tests/common/mod.rs"]
mod fixtures;
