//! Glyph-diff renderer
//!
//! Each [`TextField`] remembers the string it last put on the panel. A new
//! render compares byte by byte and only clears and redraws the glyph cells
//! that changed, so unchanged digits are never touched and the panel does
//! not flicker.
//!
//! Cell `i` of a field starts at `origin.x + i * (5 * scale.x + 1)`. A changed
//! cell is cleared together with the 1 px gap to its right, except for the
//! last cell of the new string, whose gap may belong to other content.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{Point, Size},
    primitives::Rectangle,
};
use heapless::String;

use crate::display::PanelDriver;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 8;
pub const GLYPH_SPACING: u32 = 1;

/// Longest string any field holds
pub const FIELD_CAPACITY: usize = 24;

/// Integer glyph magnification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphScale {
    pub x: u32,
    pub y: u32,
}

impl GlyphScale {
    pub const fn uniform(n: u32) -> Self {
        Self { x: n, y: n }
    }

    pub const fn cell_width(self) -> u32 {
        GLYPH_WIDTH * self.x
    }

    pub const fn cell_height(self) -> u32 {
        GLYPH_HEIGHT * self.y
    }

    /// Distance between the left edges of neighbouring cells
    pub const fn pitch(self) -> u32 {
        self.cell_width() + GLYPH_SPACING
    }
}

/// Where and how a field is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub origin: Point,
    pub scale: GlyphScale,
    pub fg: Rgb565,
    pub bg: Rgb565,
}

/// A text field plus the string last drawn into it
#[derive(Debug, Clone)]
pub struct TextField {
    spec: FieldSpec,
    drawn: String<FIELD_CAPACITY>,
}

impl TextField {
    pub const fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            drawn: String::new(),
        }
    }

    pub const fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// The string currently on the panel
    pub fn drawn(&self) -> &str {
        &self.drawn
    }

    /// Brings the panel from the cached string to `text`, touching only the
    /// cells that differ. Text past [`FIELD_CAPACITY`] bytes is dropped.
    pub fn render<P: PanelDriver>(&mut self, panel: &mut P, text: &str) {
        let text = truncate(text, FIELD_CAPACITY);
        let new = text.as_bytes();
        let old = self.drawn.as_bytes();
        let FieldSpec { scale, fg, bg, .. } = self.spec;
        let height = scale.cell_height();

        for (i, &byte) in new.iter().enumerate() {
            if old.get(i).copied().unwrap_or(0) == byte {
                continue;
            }

            let width = if i + 1 == new.len() {
                scale.cell_width()
            } else {
                scale.pitch()
            };
            let cell = self.cell_origin(i);
            panel.fill_rect(Rectangle::new(cell, Size::new(width, height)), bg);

            if byte != 0 {
                if let Some(glyph) = text.get(i..i + 1) {
                    panel.draw_text(cell, scale, glyph, fg, bg);
                }
            }
        }

        if new.len() < old.len() {
            let removed = (old.len() - new.len()) as u32;
            let width = removed * scale.pitch() - GLYPH_SPACING;
            panel.fill_rect(
                Rectangle::new(self.cell_origin(new.len()), Size::new(width, height)),
                bg,
            );
        }

        self.drawn.clear();
        // Fits: truncated to capacity above
        let _ = self.drawn.push_str(text);
    }

    /// Clears whatever the field shows.
    pub fn hide<P: PanelDriver>(&mut self, panel: &mut P) {
        self.render(panel, "");
    }

    /// Forgets the cache so the next render redraws every cell.
    pub fn invalidate(&mut self) {
        self.drawn.clear();
    }

    fn cell_origin(&self, index: usize) -> Point {
        let pitch = self.spec.scale.pitch() as i32;
        self.spec.origin + Point::new(index as i32 * pitch, 0)
    }
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::mock::{Op, RecordingPanel};
    use crate::display::GlyphPanel;
    use embedded_graphics::{mock_display::MockDisplay, prelude::RgbColor};

    const SMALL: FieldSpec = FieldSpec {
        origin: Point::new(4, 30),
        scale: GlyphScale::uniform(1),
        fg: Rgb565::YELLOW,
        bg: Rgb565::BLACK,
    };

    const LARGE: FieldSpec = FieldSpec {
        origin: Point::new(2, 2),
        scale: GlyphScale::uniform(2),
        fg: Rgb565::WHITE,
        bg: Rgb565::BLACK,
    };

    fn cell(spec: &FieldSpec, i: i32, width: u32) -> Rectangle {
        let pitch = spec.scale.pitch() as i32;
        Rectangle::new(
            spec.origin + Point::new(i * pitch, 0),
            Size::new(width, spec.scale.cell_height()),
        )
    }

    #[test]
    fn test_first_render_draws_everything() {
        let mut panel = RecordingPanel::default();
        let mut field = TextField::new(SMALL);
        field.render(&mut panel, "07/11");

        let texts: Vec<_> = panel.texts().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, ["0", "7", "/", "1", "1"]);
        assert_eq!(panel.fills().len(), 5);
        assert_eq!(field.drawn(), "07/11");
    }

    #[test]
    fn test_unchanged_text_emits_nothing() {
        let mut panel = RecordingPanel::default();
        let mut field = TextField::new(LARGE);
        field.render(&mut panel, "10:15:59");
        panel.take();

        field.render(&mut panel, "10:15:59");
        assert!(panel.ops.is_empty());
    }

    #[test]
    fn test_only_changed_cells_redrawn() {
        let mut panel = RecordingPanel::default();
        let mut field = TextField::new(LARGE);
        field.render(&mut panel, "10:15:59");
        panel.take();

        field.render(&mut panel, "10:16:00");

        let pitch = LARGE.scale.pitch();
        let last = LARGE.scale.cell_width();
        assert_eq!(
            panel.fills(),
            [cell(&LARGE, 4, pitch), cell(&LARGE, 6, pitch), cell(&LARGE, 7, last)]
        );
        let texts: Vec<_> = panel.texts();
        assert_eq!(
            texts,
            [
                (cell(&LARGE, 4, 0).top_left, "6".to_string()),
                (cell(&LARGE, 6, 0).top_left, "0".to_string()),
                (cell(&LARGE, 7, 0).top_left, "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_last_cell_clear_excludes_spacing() {
        let mut panel = RecordingPanel::default();
        let mut field = TextField::new(SMALL);
        field.render(&mut panel, "ab");

        assert_eq!(panel.fills(), [cell(&SMALL, 0, 6), cell(&SMALL, 1, 5)]);
    }

    #[test]
    fn test_shrink_clears_exactly_removed_width() {
        let mut panel = RecordingPanel::default();
        let mut field = TextField::new(SMALL);
        field.render(&mut panel, "12345");
        panel.take();

        field.render(&mut panel, "123");

        let pitch = SMALL.scale.pitch();
        assert_eq!(panel.fills(), [cell(&SMALL, 3, 2 * pitch - 1)]);
        assert!(panel.texts().is_empty());
        assert_eq!(field.drawn(), "123");
    }

    #[test]
    fn test_shrink_and_change_together() {
        let mut panel = RecordingPanel::default();
        let mut field = TextField::new(LARGE);
        field.render(&mut panel, "999");
        panel.take();

        field.render(&mut panel, "10");

        let pitch = LARGE.scale.pitch();
        assert_eq!(
            panel.fills(),
            [
                cell(&LARGE, 0, pitch),
                cell(&LARGE, 1, LARGE.scale.cell_width()),
                cell(&LARGE, 2, pitch - 1),
            ]
        );
        assert_eq!(panel.texts().len(), 2);
    }

    #[test]
    fn test_hide_clears_drawn_width_once() {
        let mut panel = RecordingPanel::default();
        let mut field = TextField::new(SMALL);
        field.render(&mut panel, "PM");
        panel.take();

        field.hide(&mut panel);
        assert_eq!(
            panel.ops,
            [Op::Fill(cell(&SMALL, 0, 2 * SMALL.scale.pitch() - 1), Rgb565::BLACK)]
        );

        field.hide(&mut panel);
        assert_eq!(panel.ops.len(), 1);
    }

    #[test]
    fn test_invalidate_forces_full_redraw() {
        let mut panel = RecordingPanel::default();
        let mut field = TextField::new(SMALL);
        field.render(&mut panel, "12");
        field.invalidate();
        panel.take();

        field.render(&mut panel, "12");
        assert_eq!(panel.texts().len(), 2);
    }

    #[test]
    fn test_nul_clears_without_drawing() {
        let mut panel = RecordingPanel::default();
        let mut field = TextField::new(SMALL);
        field.render(&mut panel, "ab");
        panel.take();

        field.render(&mut panel, "a\0");
        assert_eq!(panel.fills(), [cell(&SMALL, 1, 5)]);
        assert!(panel.texts().is_empty());
    }

    #[test]
    fn test_overlong_text_is_truncated() {
        let mut panel = RecordingPanel::default();
        let mut field = TextField::new(SMALL);
        let long = "0123456789012345678901234567";
        field.render(&mut panel, long);

        assert_eq!(field.drawn(), &long[..FIELD_CAPACITY]);
        assert_eq!(panel.texts().len(), FIELD_CAPACITY);
    }

    /// Panel contents after rendering `steps` in order into one field.
    /// Pixels never touched read as background.
    fn pixels_after(scale: GlyphScale, steps: &[&str]) -> Vec<Rgb565> {
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        let mut panel = GlyphPanel::new(display);
        let mut field = TextField::new(FieldSpec {
            origin: Point::new(1, 1),
            scale,
            fg: Rgb565::WHITE,
            bg: Rgb565::BLACK,
        });
        for text in steps {
            field.render(&mut panel, text);
        }

        let display = panel.into_inner();
        (0..64)
            .flat_map(|y| (0..64).map(move |x| Point::new(x, y)))
            .map(|p| display.get_pixel(p).unwrap_or(Rgb565::BLACK))
            .collect()
    }

    #[test]
    fn test_no_stray_pixels_at_cell_boundaries() {
        let scales = [
            GlyphScale::uniform(1),
            GlyphScale::uniform(2),
            GlyphScale { x: 2, y: 3 },
        ];
        let sequences: [&[&str]; 5] = [
            &["1:59", "2:00"],
            &["8888", "1"],
            &["1", "8888", "88"],
            &["W", "", "M"],
            &["12:00", ""],
        ];

        for scale in scales {
            for steps in sequences {
                let last = steps[steps.len() - 1];
                assert!(
                    pixels_after(scale, steps) == pixels_after(scale, &[last]),
                    "{:?} at {:?} differs from a fresh {:?}",
                    steps,
                    scale,
                    last
                );
            }
        }
    }
}
