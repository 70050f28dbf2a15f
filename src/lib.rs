//! glyphmap - map private-use font glyphs to standard CJK codepoints
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │        GlyphOutlineMapper::map_range     │
//! ├──────────────────────────────────────────┤
//! │   worker pool (concurrency limit)        │
//! │                  ↓                       │
//! │   RuneResolver (scan U+4E00..=U+9FFF)    │
//! │        ↓                     ↓           │
//! │  existence test      outline comparison  │
//! │                  ↓                       │
//! │   FreeType (unhinted 26.6 outlines)      │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ```no_run
//! use glyphmap::GlyphOutlineMapper;
//!
//! # fn main() -> anyhow::Result<()> {
//! let special = std::fs::read("special.ttf")?;
//! let standard = std::fs::read("standard.ttf")?;
//! let mut mapper = GlyphOutlineMapper::new(&special, &standard)?;
//! mapper.set_concurrency(16);
//! for (special, standard) in mapper.map_range(0xE000, 0xF8FF) {
//!     println!("U+{:04X} => U+{:04X}", special, standard);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod font;
pub mod mapper;

pub use constants::{Codepoint, CANDIDATE_RANGE};
pub use error::{FontError, MapperError};
pub use mapper::{GlyphOutlineMapper, MappingTable, MatchSettings, RuneMatch};
