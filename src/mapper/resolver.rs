//! Rune resolver
//!
//! Scans the CJK Unified Ideographs block of the standard font for the
//! first glyph whose unhinted outline matches the special glyph.

use crate::constants::{
    Codepoint, CANDIDATE_RANGE, DEFAULT_PROBE_SIZE, DEFAULT_RENDER_SIZE, DEFAULT_TOLERANCE,
};
use crate::error::FontError;
use crate::font::freetype::HintingMode;
use crate::font::outline::{outlines_equal, GlyphOutline};
use crate::font::source::GlyphSource;
use crate::mapper::existence::has_glyph;
use log::{debug, trace};

/// Numeric knobs of the matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    /// Pixel size outlines are compared at
    pub render_size: u32,
    /// Max per-axis deviation (26.6 units at `render_size`)
    pub tolerance: i64,
    /// Pixel size for the existence probe
    pub probe_size: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            render_size: DEFAULT_RENDER_SIZE,
            tolerance: DEFAULT_TOLERANCE,
            probe_size: DEFAULT_PROBE_SIZE,
        }
    }
}

/// A special codepoint and the standard codepoint it renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuneMatch {
    pub special: Codepoint,
    pub standard: Codepoint,
}

/// Resolves special codepoints against one pair of open fonts
pub struct RuneResolver<'a, S: GlyphSource> {
    special: &'a S,
    standard: &'a S,
    settings: &'a MatchSettings,
}

impl<'a, S: GlyphSource> RuneResolver<'a, S> {
    pub fn new(special: &'a S, standard: &'a S, settings: &'a MatchSettings) -> Self {
        Self {
            special,
            standard,
            settings,
        }
    }

    /// Find the lowest standard codepoint whose outline matches `cp`
    pub fn resolve(&self, cp: Codepoint) -> Option<RuneMatch> {
        if !has_glyph(Some(self.special), cp, self.settings.probe_size) {
            trace!("U+{:04X}: no glyph in special font", cp);
            return None;
        }

        let special_outline = self.special_outline(cp)?;

        for candidate in CANDIDATE_RANGE {
            if !has_glyph(Some(self.standard), candidate, self.settings.probe_size) {
                continue;
            }
            if self.candidate_matches(&special_outline, candidate) {
                debug!("U+{:04X} => U+{:04X}", cp, candidate);
                return Some(RuneMatch {
                    special: cp,
                    standard: candidate,
                });
            }
        }

        debug!("U+{:04X}: no matching outline", cp);
        None
    }

    /// Compare the glyphs of one special and one standard codepoint
    ///
    /// `Ok(false)` when either font has no cmap entry. Unlike the scan,
    /// an outline that fails to load is reported to the caller.
    pub fn outlines_match(
        &self,
        special_cp: Codepoint,
        standard_cp: Codepoint,
    ) -> Result<bool, FontError> {
        let special_index = self.special.glyph_index(special_cp);
        let standard_index = self.standard.glyph_index(standard_cp);
        if special_index == 0 || standard_index == 0 {
            return Ok(false);
        }

        let size = self.settings.render_size;
        let special = self
            .special
            .load_outline(size, special_index, HintingMode::None)?;
        let standard = self
            .standard
            .load_outline(size, standard_index, HintingMode::None)?;
        Ok(outlines_equal(&special, &standard, self.settings.tolerance))
    }

    /// The special glyph does not change across candidates, load it once
    fn special_outline(&self, cp: Codepoint) -> Option<GlyphOutline> {
        let index = self.special.glyph_index(cp);
        if index == 0 {
            trace!("U+{:04X}: special glyph has no index", cp);
            return None;
        }
        match self
            .special
            .load_outline(self.settings.render_size, index, HintingMode::None)
        {
            Ok(outline) => Some(outline),
            Err(e) => {
                trace!("U+{:04X}: {}", cp, e);
                None
            }
        }
    }

    fn candidate_matches(&self, special_outline: &GlyphOutline, candidate: Codepoint) -> bool {
        let index = self.standard.glyph_index(candidate);
        if index == 0 {
            return false;
        }
        match self
            .standard
            .load_outline(self.settings.render_size, index, HintingMode::None)
        {
            Ok(outline) => outlines_equal(special_outline, &outline, self.settings.tolerance),
            Err(e) => {
                trace!("candidate U+{:04X} skipped: {}", candidate, e);
                false
            }
        }
    }
}
