//! Connector diagram drawn beneath a rendered value
//!
//! The diagram links every reuse marker back to the position where its
//! identity was first expanded:
//!
//! ```text
//! pair = Pair{ a: &1, b: & }
//!                 │      │
//!                 └──────┘
//! ```
//!
//! # Layout
//!
//! The grid has one row per pointer record plus a lead-in row:
//!
//! - Row 0 carries a vertical bar under every definition and usage.
//! - Row `k` is the own row of the record with sequence number `k`: a corner
//!   under the definition, a branch under each usage and horizontal fill in
//!   between.
//! - Records with a higher sequence number are still travelling down, so
//!   they contribute vertical bars to row `k`; a bar landing on horizontal
//!   fill becomes a cross junction.
//!
//! Records that were never reused draw nothing. When no record was reused
//! the diagram is omitted entirely.

use super::registry::{IdentityRegistry, PointerRecord};

/// One diagram cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Blank,
    /// Under a definition, on the record's own row
    Corner,
    /// Under a usage that is not the last one
    Branch,
    /// Under the last usage
    FinalBranch,
    Horizontal,
    Vertical,
    Cross,
}

/// Characters used to draw glyphs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GlyphSet {
    #[default]
    Unicode,
    Ascii,
}

impl GlyphSet {
    pub fn glyph(self, glyph: Glyph) -> char {
        match (self, glyph) {
            (_, Glyph::Blank) => ' ',
            (GlyphSet::Unicode, Glyph::Corner) => '└',
            (GlyphSet::Unicode, Glyph::Branch) => '┴',
            (GlyphSet::Unicode, Glyph::FinalBranch) => '┘',
            (GlyphSet::Unicode, Glyph::Horizontal) => '─',
            (GlyphSet::Unicode, Glyph::Vertical) => '│',
            (GlyphSet::Unicode, Glyph::Cross) => '┼',
            (GlyphSet::Ascii, Glyph::Corner) => '`',
            (GlyphSet::Ascii, Glyph::Branch) => '+',
            (GlyphSet::Ascii, Glyph::FinalBranch) => '\'',
            (GlyphSet::Ascii, Glyph::Horizontal) => '-',
            (GlyphSet::Ascii, Glyph::Vertical) => '|',
            (GlyphSet::Ascii, Glyph::Cross) => '+',
        }
    }

    /// Whether `c` is a non-blank glyph of either set
    pub fn is_connector(c: char) -> bool {
        matches!(
            c,
            '└' | '┴' | '┘' | '─' | '│' | '┼' | '`' | '+' | '\'' | '-' | '|'
        )
    }
}

/// Grid of glyphs, rows × columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    rows: Vec<Vec<Glyph>>,
}

impl Diagram {
    /// Build the diagram for a finished rendering pass
    ///
    /// `header_width` is the number of columns printed before the value text
    /// on its line; `text_width` is the value text length in characters.
    /// Returns `None` when no identity was reused.
    pub fn build(
        registry: &IdentityRegistry,
        header_width: usize,
        text_width: usize,
    ) -> Option<Diagram> {
        if !registry.has_usages() {
            return None;
        }

        let width = header_width + text_width;
        let mut rows = vec![vec![Glyph::Blank; width]; registry.len() + 1];

        for (row_number, row) in rows.iter_mut().enumerate() {
            if let Some(owner) = registry.by_sequence(row_number) {
                if owner.has_usages() {
                    draw_own_row(row, owner, header_width);
                }
            }

            for record in registry
                .records()
                .iter()
                .filter(|r| r.has_usages() && r.sequence_number > row_number)
            {
                draw_pass_through(row, record, header_width);
            }
        }

        tracing::debug!(rows = rows.len(), width, "pointer diagram built");
        Some(Diagram { rows })
    }

    pub fn rows(&self) -> &[Vec<Glyph>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Draw every row followed by a line break
    pub fn render(&self, glyphs: GlyphSet) -> String {
        let mut out = String::with_capacity(self.rows.len() * (self.width() + 1));
        for row in &self.rows {
            out.extend(row.iter().map(|&g| glyphs.glyph(g)));
            out.push('\n');
        }
        out
    }
}

fn set(row: &mut [Glyph], column: usize, glyph: Glyph) {
    if let Some(cell) = row.get_mut(column) {
        *cell = glyph;
    }
}

fn draw_own_row(row: &mut [Glyph], record: &PointerRecord, header_width: usize) {
    let start = record.definition_position + header_width;
    set(row, start, Glyph::Corner);

    let last = record.usage_positions.len() - 1;
    for (i, &position) in record.usage_positions.iter().enumerate() {
        let glyph = if i < last {
            Glyph::Branch
        } else {
            Glyph::FinalBranch
        };
        set(row, position + header_width, glyph);
    }

    let end = record.usage_positions[last] + header_width;
    for cell in row.iter_mut().take(end).skip(start + 1) {
        if *cell == Glyph::Blank {
            *cell = Glyph::Horizontal;
        }
    }
}

fn draw_pass_through(row: &mut [Glyph], record: &PointerRecord, header_width: usize) {
    let columns = std::iter::once(record.definition_position)
        .chain(record.usage_positions.iter().copied())
        .map(|position| position + header_width);

    for column in columns {
        if let Some(cell) = row.get_mut(column) {
            *cell = match *cell {
                Glyph::Blank => Glyph::Vertical,
                Glyph::Horizontal | Glyph::Vertical => Glyph::Cross,
                other => other,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::IdentityKey;

    fn registry_with(records: &[(usize, &[usize])], keys: &[u8]) -> IdentityRegistry {
        let mut registry = IdentityRegistry::new();
        for ((definition, usages), key) in records.iter().zip(keys) {
            let identity = IdentityKey::of(key);
            registry.define(identity, *definition);
            for &usage in *usages {
                registry.lookup_mut(&identity).unwrap().record_usage(usage);
            }
        }
        registry
    }

    #[test]
    fn test_no_usages_no_diagram() {
        let keys = [0u8];
        let registry = registry_with(&[(0, &[])], &keys);
        assert!(Diagram::build(&registry, 0, 10).is_none());
    }

    #[test]
    fn test_single_record() {
        let keys = [0u8];
        let registry = registry_with(&[(1, &[4, 7])], &keys);
        let diagram = Diagram::build(&registry, 2, 8).unwrap();

        assert_eq!(diagram.width(), 10);
        assert_eq!(
            diagram.render(GlyphSet::Unicode),
            "   │  │  │\n   └──┴──┘\n"
        );
        assert_eq!(
            diagram.render(GlyphSet::Ascii),
            "   |  |  |\n   `--+--'\n"
        );
    }

    #[test]
    fn test_later_record_crosses_earlier_row() {
        // "&A{ &B{}, x, y }": A defined at 0 reused at 12, B defined at 4 reused at 14
        let keys = [0u8, 1u8];
        let registry = registry_with(&[(0, &[12]), (4, &[14])], &keys);
        let diagram = Diagram::build(&registry, 0, 16).unwrap();

        let text = diagram.render(GlyphSet::Unicode);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "│   │       │ │ ");
        assert_eq!(lines[1], "└───┼───────┘ │ ");
        assert_eq!(lines[2], "    └─────────┘ ");
    }

    #[test]
    fn test_unused_record_keeps_blank_row() {
        let keys = [0u8, 1u8];
        let registry = registry_with(&[(0, &[]), (2, &[5])], &keys);
        let diagram = Diagram::build(&registry, 0, 6).unwrap();

        let text = diagram.render(GlyphSet::Unicode);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["  │  │", "  │  │", "  └──┘"]);
    }
}
