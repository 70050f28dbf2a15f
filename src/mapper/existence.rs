//! Glyph existence test
//!
//! Fonts often report a nonzero glyph index for empty placeholder
//! glyphs, so presence is decided from several signals: cmap index,
//! bounding box and advance at a small probe size, and whether the
//! codepoint sits in the Private Use Area.
//!
//! Signal collection and the decision are split so the policy can be
//! tested without a font.

use crate::constants::{is_private_use, Codepoint};
use crate::font::outline::GlyphBounds;
use crate::font::source::GlyphSource;

/// Verdict of the existence test, with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphCheck {
    /// No font loaded
    NoFont,
    /// Bounds/advance query failed
    BoundsUnavailable,
    /// cmap has no entry (outside the PUA)
    NoIndex,
    /// PUA glyph with a horizontal advance
    PrivateUseAdvance,
    /// PUA glyph with visible ink
    PrivateUseBounds,
    /// PUA glyph with only a cmap entry
    PrivateUseIndex,
    /// PUA codepoint with no signal at all
    PrivateUseEmpty,
    /// Index present but no ink and no advance
    Placeholder,
    /// Valid index
    Indexed,
    /// Codepoint 0 without an index
    Unindexed,
}

impl GlyphCheck {
    pub fn is_present(self) -> bool {
        matches!(
            self,
            Self::PrivateUseAdvance | Self::PrivateUseBounds | Self::PrivateUseIndex | Self::Indexed
        )
    }
}

/// Everything the decision table looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSignals {
    pub codepoint: Codepoint,
    pub index: u32,
    /// `None` when the bounds query failed
    pub bounds: Option<GlyphBounds>,
}

impl GlyphSignals {
    fn private_use(&self) -> bool {
        is_private_use(self.codepoint)
    }

    fn advance(&self) -> i64 {
        self.bounds.map_or(0, |b| b.advance)
    }

    fn has_ink(&self) -> bool {
        self.bounds.is_some_and(|b| !b.bbox.is_empty())
    }
}

type Rule = (fn(&GlyphSignals) -> bool, GlyphCheck);

/// Ordered rules, first match wins.
///
/// Inside the PUA any one of advance, ink or index is enough, and that
/// takes precedence over the placeholder filter.
const RULES: &[Rule] = &[
    (|s: &GlyphSignals| s.bounds.is_none(), GlyphCheck::BoundsUnavailable),
    (
        |s: &GlyphSignals| !s.private_use() && s.index == 0 && s.codepoint != 0,
        GlyphCheck::NoIndex,
    ),
    (
        |s: &GlyphSignals| s.private_use() && s.advance() > 0,
        GlyphCheck::PrivateUseAdvance,
    ),
    (
        |s: &GlyphSignals| s.private_use() && s.has_ink(),
        GlyphCheck::PrivateUseBounds,
    ),
    (
        |s: &GlyphSignals| s.private_use() && s.index > 0,
        GlyphCheck::PrivateUseIndex,
    ),
    (|s: &GlyphSignals| s.private_use(), GlyphCheck::PrivateUseEmpty),
    (
        |s: &GlyphSignals| !s.has_ink() && s.advance() == 0,
        GlyphCheck::Placeholder,
    ),
    (|s: &GlyphSignals| s.index > 0, GlyphCheck::Indexed),
];

/// Apply the decision table to collected signals
pub fn decide(signals: &GlyphSignals) -> GlyphCheck {
    RULES
        .iter()
        .find(|(applies, _)| applies(signals))
        .map_or(GlyphCheck::Unindexed, |&(_, verdict)| verdict)
}

/// Collect signals from `font` and decide
pub fn check_glyph<S: GlyphSource>(font: Option<&S>, cp: Codepoint, probe_size: u32) -> GlyphCheck {
    let Some(font) = font else {
        return GlyphCheck::NoFont;
    };

    let index = font.glyph_index(cp);

    // Outside the PUA a missing index is final; skip the bounds probe
    if index == 0 && cp != 0 && !is_private_use(cp) {
        return GlyphCheck::NoIndex;
    }

    decide(&GlyphSignals {
        codepoint: cp,
        index,
        bounds: font.glyph_bounds(cp, probe_size),
    })
}

/// True if `font` has a meaningful glyph for `cp`
pub fn has_glyph<S: GlyphSource>(font: Option<&S>, cp: Codepoint, probe_size: u32) -> bool {
    check_glyph(font, cp, probe_size).is_present()
}
