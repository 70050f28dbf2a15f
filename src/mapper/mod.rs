//! Glyph outline mapper
//!
//! Owns the special and standard fonts and maps special codepoints to
//! the standard CJK codepoint with the same outline.
//!
//! ```text
//! map_range ─┬─ worker ── RuneResolver ─┬─ existence test
//!            ├─ worker ──      …        └─ outline comparison
//!            └─ …
//! ```

pub mod batch;
pub mod existence;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

use crate::constants::{Codepoint, DEFAULT_CONCURRENCY};
use crate::error::{FontError, MapperError};
use crate::font::FontHandle;
use log::{info, warn};
use std::collections::HashMap;

pub use existence::{check_glyph, has_glyph, GlyphCheck};
pub use resolver::{MatchSettings, RuneMatch, RuneResolver};

/// Special codepoint -> standard codepoint
pub type MappingTable = HashMap<Codepoint, Codepoint>;

/// Maps special-font codepoints onto standard CJK codepoints
#[derive(Debug, Clone)]
pub struct GlyphOutlineMapper {
    special: FontHandle,
    standard: FontHandle,
    /// Max resolutions in flight during `map_range`
    concurrency: usize,
    settings: MatchSettings,
}

impl GlyphOutlineMapper {
    /// Parse both fonts; the error names the font that failed
    pub fn new(special_font: &[u8], standard_font: &[u8]) -> Result<Self, MapperError> {
        let special = FontHandle::parse(special_font).map_err(MapperError::SpecialFont)?;
        let standard = FontHandle::parse(standard_font).map_err(MapperError::StandardFont)?;

        info!(
            "Mapper ready: special={} standard={}",
            special.family(),
            standard.family()
        );

        Ok(Self {
            special,
            standard,
            concurrency: DEFAULT_CONCURRENCY,
            settings: MatchSettings::default(),
        })
    }

    /// Replace rendering size, tolerance and probe size
    pub fn with_settings(mut self, settings: MatchSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Change the concurrency limit for subsequent batches (0 is treated as 1)
    pub fn set_concurrency(&mut self, concurrency: usize) {
        self.concurrency = concurrency.max(1);
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn special_font(&self) -> &FontHandle {
        &self.special
    }

    pub fn standard_font(&self) -> &FontHandle {
        &self.standard
    }

    /// Resolve one special codepoint
    pub fn resolve_rune(&self, cp: Codepoint) -> Option<RuneMatch> {
        let (special, standard) = match (self.special.open(), self.standard.open()) {
            (Ok(special), Ok(standard)) => (special, standard),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to open fonts for U+{:04X}: {}", cp, e);
                return None;
            }
        };
        RuneResolver::new(&special, &standard, &self.settings).resolve(cp)
    }

    /// Compare the outlines of one special and one standard codepoint
    ///
    /// No existence test and no scan. `Ok(false)` when either codepoint has
    /// no glyph index; open and load failures are returned.
    pub fn outlines_match(
        &self,
        special: Codepoint,
        standard: Codepoint,
    ) -> Result<bool, FontError> {
        let special_face = self.special.open()?;
        let standard_face = self.standard.open()?;
        RuneResolver::new(&special_face, &standard_face, &self.settings)
            .outlines_match(special, standard)
    }

    /// Resolve every codepoint in `[start, end]`; `start > end` gives an empty table
    pub fn map_range(&self, start: Codepoint, end: Codepoint) -> MappingTable {
        batch::map_range(
            &self.special,
            &self.standard,
            start,
            end,
            self.concurrency,
            &self.settings,
        )
    }

    /// `map_range` on tokio's blocking pool
    ///
    /// Must be called from within a tokio runtime.
    pub async fn map_range_async(&self, start: Codepoint, end: Codepoint) -> MappingTable {
        let mapper = self.clone();
        match tokio::task::spawn_blocking(move || mapper.map_range(start, end)).await {
            Ok(table) => table,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                warn!("Batch task did not complete: {}", e);
                MappingTable::new()
            }
        }
    }
}
