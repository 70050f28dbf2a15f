//! Global constants for glyphmap
//!
//! Consolidates Unicode ranges and matching defaults
//! to eliminate magic numbers throughout the codebase.

use std::ops::RangeInclusive;

/// Unicode scalar value (kept as `u32` so arbitrary ranges can be walked)
pub type Codepoint = u32;

// ============================================================================
// Unicode Ranges
// ============================================================================

/// Private Use Area start
pub const PUA_START: Codepoint = 0xE000;

/// Private Use Area end (inclusive)
pub const PUA_END: Codepoint = 0xF8FF;

/// CJK Unified Ideographs start
pub const CJK_UNIFIED_START: Codepoint = 0x4E00;

/// CJK Unified Ideographs end (inclusive)
pub const CJK_UNIFIED_END: Codepoint = 0x9FFF;

/// Standard-font codepoints searched for a matching outline
pub const CANDIDATE_RANGE: RangeInclusive<Codepoint> = CJK_UNIFIED_START..=CJK_UNIFIED_END;

/// Check if codepoint lies in the Private Use Area
#[inline]
pub fn is_private_use(cp: Codepoint) -> bool {
    (PUA_START..=PUA_END).contains(&cp)
}

// ============================================================================
// Matching Defaults
// ============================================================================

/// Pixel size (ppem) outlines are loaded at for comparison
pub const DEFAULT_RENDER_SIZE: u32 = 1000;

/// Max per-axis point deviation in 26.6 units at `DEFAULT_RENDER_SIZE`
pub const DEFAULT_TOLERANCE: i64 = 10;

/// Pixel size used when probing glyph bounds and advance
pub const DEFAULT_PROBE_SIZE: u32 = 12;

/// Simultaneous resolutions during a batch
pub const DEFAULT_CONCURRENCY: usize = 10;
