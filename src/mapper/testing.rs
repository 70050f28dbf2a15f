//! In-memory fonts for matcher tests

use crate::constants::Codepoint;
use crate::error::FontError;
use crate::font::freetype::HintingMode;
use crate::font::outline::{BoundingBox, GlyphBounds, GlyphOutline, Point};
use crate::font::source::{GlyphSource, SourceProvider};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Square-ish single contour, distinct per `seed`
pub fn glyph_shape(seed: i64) -> GlyphOutline {
    let w = 640 * seed;
    GlyphOutline::new(
        vec![3],
        vec![
            Point::new(0, 0),
            Point::new(w, 0),
            Point::new(w, 6400),
            Point::new(0, 6400),
        ],
    )
}

fn inked() -> GlyphBounds {
    GlyphBounds {
        bbox: BoundingBox {
            x_min: 0,
            y_min: 0,
            x_max: 640,
            y_max: 640,
        },
        advance: 768,
    }
}

/// Font backed by hash maps, counting the calls made into it
#[derive(Clone)]
pub struct FakeFont {
    cmap: HashMap<Codepoint, u32>,
    bounds: HashMap<Codepoint, GlyphBounds>,
    outlines: HashMap<u32, GlyphOutline>,
    /// Bounds reported for unmapped codepoints
    notdef: GlyphBounds,
    next_index: u32,
    /// Time each bounds query takes
    probe_delay: Option<Duration>,
    outline_loads: Arc<AtomicUsize>,
    bounds_queries: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl FakeFont {
    pub fn new() -> Self {
        Self {
            cmap: HashMap::new(),
            bounds: HashMap::new(),
            outlines: HashMap::new(),
            notdef: GlyphBounds::default(),
            next_index: 1,
            probe_delay: None,
            outline_loads: Arc::new(AtomicUsize::new(0)),
            bounds_queries: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn insert(mut self, cp: Codepoint, bounds: GlyphBounds, outline: Option<GlyphOutline>) -> Self {
        let index = self.next_index;
        self.next_index += 1;
        self.cmap.insert(cp, index);
        self.bounds.insert(cp, bounds);
        if let Some(outline) = outline {
            self.outlines.insert(index, outline);
        }
        self
    }

    pub fn with_glyph(self, cp: Codepoint, outline: GlyphOutline) -> Self {
        self.insert(cp, inked(), Some(outline))
    }

    /// Mapped glyph whose outline fails to load
    pub fn with_broken_glyph(self, cp: Codepoint) -> Self {
        self.insert(cp, inked(), None)
    }

    /// Mapped glyph with no ink and no advance
    pub fn with_placeholder(self, cp: Codepoint, outline: GlyphOutline) -> Self {
        self.insert(cp, GlyphBounds::default(), Some(outline))
    }

    /// Give .notdef metrics (unmapped codepoints load glyph 0)
    pub fn with_notdef(mut self, bounds: GlyphBounds) -> Self {
        self.notdef = bounds;
        self
    }

    /// Make every bounds query take `delay`, tracking overlap
    pub fn with_probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = Some(delay);
        self
    }

    pub fn outline_loads(&self) -> usize {
        self.outline_loads.load(Ordering::SeqCst)
    }

    pub fn bounds_queries(&self) -> usize {
        self.bounds_queries.load(Ordering::SeqCst)
    }

    /// Most bounds queries seen running at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl GlyphSource for FakeFont {
    fn glyph_index(&self, cp: Codepoint) -> u32 {
        self.cmap.get(&cp).copied().unwrap_or(0)
    }

    fn glyph_bounds(&self, cp: Codepoint, _size: u32) -> Option<GlyphBounds> {
        self.bounds_queries.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.probe_delay {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            thread::sleep(delay);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        Some(self.bounds.get(&cp).copied().unwrap_or(self.notdef))
    }

    fn load_outline(
        &self,
        _size: u32,
        glyph_index: u32,
        _hinting: HintingMode,
    ) -> Result<GlyphOutline, FontError> {
        self.outline_loads.fetch_add(1, Ordering::SeqCst);
        self.outlines
            .get(&glyph_index)
            .cloned()
            .ok_or(FontError::Outline {
                glyph_index,
                reason: "broken glyph".to_string(),
            })
    }
}

impl SourceProvider for FakeFont {
    type Source = FakeFont;

    fn open(&self) -> Result<FakeFont, FontError> {
        Ok(self.clone())
    }
}
