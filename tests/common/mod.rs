//! Minimal TrueType fonts built in memory with write-fonts
//!
//! Simple on-curve glyphs only. Units per em is 1000, so at 1000px one
//! font unit is 64 in 26.6.

#![allow(dead_code)]

use write_fonts::tables::cmap::Cmap;
use write_fonts::read::tables::glyf::CurvePoint;
use write_fonts::tables::glyf::{Bbox, GlyfLocaBuilder, Glyph, SimpleGlyph};
use write_fonts::tables::head::Head;
use write_fonts::tables::hhea::Hhea;
use write_fonts::tables::hmtx::{Hmtx, LongMetric};
use write_fonts::tables::loca::LocaFormat;
use write_fonts::tables::maxp::Maxp;
use write_fonts::tables::name::{Name, NameRecord};
use write_fonts::types::{FWord, GlyphId, NameId, UfWord};
use write_fonts::FontBuilder as TableBuilder;

pub const UNITS_PER_EM: u16 = 1000;

/// One contour, on-curve points in font units
pub type Contour = Vec<(i16, i16)>;

/// Axis-aligned rectangle contour
pub fn rect(x0: i16, y0: i16, x1: i16, y1: i16) -> Contour {
    vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
}

struct TestGlyph {
    glyph: Glyph,
    advance: u16,
    points: u16,
    contours: u16,
}

impl TestGlyph {
    fn new(contours: Vec<Contour>, advance: u16) -> Self {
        let points = contours.iter().map(Vec::len).sum::<usize>() as u16;
        let count = contours.len() as u16;

        let glyph = if contours.is_empty() {
            Glyph::Empty
        } else {
            let mut simple = SimpleGlyph {
                bbox: Bbox::default(),
                contours: contours
                    .into_iter()
                    .map(|c| {
                        c.into_iter()
                            .map(|(x, y)| CurvePoint::on_curve(x, y))
                            .collect::<Vec<_>>()
                            .into()
                    })
                    .collect(),
                instructions: Vec::new(),
            };
            simple.recompute_bounding_box();
            Glyph::Simple(simple)
        };

        Self {
            glyph,
            advance,
            points,
            contours: count,
        }
    }

    fn bbox(&self) -> Option<Bbox> {
        match &self.glyph {
            Glyph::Simple(simple) => Some(simple.bbox.clone()),
            _ => None,
        }
    }

    fn metric(&self) -> LongMetric {
        let lsb = self.bbox().map(|b| b.x_min).unwrap_or(0);
        LongMetric::new(self.advance, lsb)
    }
}

/// Builder for a tiny TrueType font
pub struct FontBuilder {
    family: String,
    glyphs: Vec<TestGlyph>,
    cmap: Vec<(u32, u32)>,
}

impl FontBuilder {
    /// Starts with an empty, zero-advance .notdef
    pub fn new(family: &str) -> Self {
        Self {
            family: family.to_string(),
            glyphs: vec![TestGlyph::new(Vec::new(), 0)],
            cmap: Vec::new(),
        }
    }

    /// Map `cp` to a new glyph
    pub fn glyph(mut self, cp: u32, contours: Vec<Contour>, advance: u16) -> Self {
        let index = self.glyphs.len() as u32;
        self.glyphs.push(TestGlyph::new(contours, advance));
        self.cmap.push((cp, index));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut glyf_loca = GlyfLocaBuilder::new();
        for glyph in &self.glyphs {
            glyf_loca.add_glyph(&glyph.glyph).expect("glyph should encode");
        }
        let (glyf, loca, loca_format) = glyf_loca.build();

        let cmap = Cmap::from_mappings(self.cmap.iter().map(|&(cp, index)| {
            let ch = char::from_u32(cp).expect("test codepoints are scalar values");
            (ch, GlyphId::new(index))
        }))
        .expect("one glyph per codepoint");

        let bbox = self
            .glyphs
            .iter()
            .filter_map(TestGlyph::bbox)
            .reduce(|a, b| Bbox {
                x_min: a.x_min.min(b.x_min),
                y_min: a.y_min.min(b.y_min),
                x_max: a.x_max.max(b.x_max),
                y_max: a.y_max.max(b.y_max),
            })
            .unwrap_or_default();

        let head = Head {
            units_per_em: UNITS_PER_EM,
            x_min: bbox.x_min,
            y_min: bbox.y_min,
            x_max: bbox.x_max,
            y_max: bbox.y_max,
            lowest_rec_ppem: 8,
            index_to_loc_format: match loca_format {
                LocaFormat::Short => 0,
                LocaFormat::Long => 1,
            },
            ..Default::default()
        };

        let num_glyphs = self.glyphs.len() as u16;
        let hhea = Hhea {
            ascender: FWord::new(880),
            descender: FWord::new(-120),
            advance_width_max: UfWord::new(
                self.glyphs.iter().map(|g| g.advance).max().unwrap_or(0),
            ),
            x_max_extent: FWord::new(bbox.x_max),
            caret_slope_rise: 1,
            number_of_h_metrics: num_glyphs,
            ..Default::default()
        };
        let hmtx = Hmtx::new(self.glyphs.iter().map(TestGlyph::metric).collect(), Vec::new());

        let maxp = Maxp {
            num_glyphs,
            max_points: self.glyphs.iter().map(|g| g.points).max(),
            max_contours: self.glyphs.iter().map(|g| g.contours).max(),
            max_composite_points: Some(0),
            max_composite_contours: Some(0),
            max_zones: Some(2),
            max_twilight_points: Some(0),
            max_storage: Some(0),
            max_function_defs: Some(0),
            max_instruction_defs: Some(0),
            max_stack_elements: Some(0),
            max_size_of_instructions: Some(0),
            max_component_elements: Some(0),
            max_component_depth: Some(0),
        };

        let name = Name::new(
            [
                (NameId::FAMILY_NAME, self.family.clone()),
                (NameId::SUBFAMILY_NAME, "Regular".to_string()),
            ]
            .into_iter()
            .map(|(id, text)| NameRecord::new(3, 1, 0x0409, id, text.into()))
            .collect(),
        );

        let mut font = TableBuilder::new();
        font.add_table(&cmap).expect("cmap");
        font.add_table(&glyf).expect("glyf");
        font.add_table(&head).expect("head");
        font.add_table(&hhea).expect("hhea");
        font.add_table(&hmtx).expect("hmtx");
        font.add_table(&loca).expect("loca");
        font.add_table(&maxp).expect("maxp");
        font.add_table(&name).expect("name");
        font.build()
    }
}
