//! Panel driver boundary
//!
//! The renderer talks to the panel only through [`PanelDriver`]. Draw calls
//! are assumed to succeed; a driver error is the driver's own business.
//!
//! [`GlyphPanel`] implements the trait on top of any embedded-graphics
//! `DrawTarget<Color = Rgb565>`, using the 5x8 ASCII font scaled per pixel.

use embedded_graphics::{
    mono_font::{ascii::FONT_5X8, MonoTextStyleBuilder},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Baseline, Text},
    Pixel,
};

use crate::render::GlyphScale;

/// How a circle is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CircleStyle {
    Filled,
    /// Outline of the given stroke width, inside the radius
    Ring(u32),
}

/// Operations consumed from the display driver
pub trait PanelDriver {
    /// Selects the region that following `stream_pixel` calls fill, row by row.
    fn set_address_window(&mut self, area: Rectangle);

    /// Writes one pixel at the window cursor and advances it.
    fn stream_pixel(&mut self, color: Rgb565);

    fn fill_rect(&mut self, area: Rectangle, color: Rgb565);

    /// Draws `text` one glyph cell per character, cells `5 * scale.x + 1`
    /// pixels apart, each cell painted `fg` on `bg`.
    fn draw_text(&mut self, origin: Point, scale: GlyphScale, text: &str, fg: Rgb565, bg: Rgb565);

    fn draw_circle(&mut self, center: Point, radius: u32, style: CircleStyle, color: Rgb565);
}

/// Paints `area` with `color` by streaming raw pixels through an address window.
pub fn clear_panel<P: PanelDriver>(panel: &mut P, area: Rectangle, color: Rgb565) {
    panel.set_address_window(area);
    for _ in 0..area.size.width * area.size.height {
        panel.stream_pixel(color);
    }
}

/// [`PanelDriver`] over an embedded-graphics draw target
pub struct GlyphPanel<D> {
    target: D,
    window: Rectangle,
    cursor: Point,
}

impl<D> GlyphPanel<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            window: Rectangle::zero(),
            cursor: Point::zero(),
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> PanelDriver for GlyphPanel<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn set_address_window(&mut self, area: Rectangle) {
        self.window = area;
        self.cursor = area.top_left;
    }

    fn stream_pixel(&mut self, color: Rgb565) {
        let Some(bottom_right) = self.window.bottom_right() else {
            return;
        };

        Pixel(self.cursor, color).draw(&mut self.target).ok();

        self.cursor.x += 1;
        if self.cursor.x > bottom_right.x {
            self.cursor.x = self.window.top_left.x;
            self.cursor.y += 1;
            if self.cursor.y > bottom_right.y {
                self.cursor.y = self.window.top_left.y;
            }
        }
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) {
        self.target.fill_solid(&area, color).ok();
    }

    fn draw_text(&mut self, origin: Point, scale: GlyphScale, text: &str, fg: Rgb565, bg: Rgb565) {
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_5X8)
            .text_color(fg)
            .background_color(bg)
            .build();
        let pitch = scale.pitch() as i32;

        for (i, c) in text.chars().enumerate() {
            let mut utf8 = [0u8; 4];
            let mut cell = Scaled {
                target: &mut self.target,
                origin: origin + Point::new(i as i32 * pitch, 0),
                scale,
            };
            Text::with_baseline(c.encode_utf8(&mut utf8), Point::zero(), style, Baseline::Top)
                .draw(&mut cell)
                .ok();
        }
    }

    fn draw_circle(&mut self, center: Point, radius: u32, style: CircleStyle, color: Rgb565) {
        let style = match style {
            CircleStyle::Filled => PrimitiveStyle::with_fill(color),
            CircleStyle::Ring(width) => PrimitiveStyleBuilder::new()
                .stroke_color(color)
                .stroke_width(width)
                .stroke_alignment(StrokeAlignment::Inside)
                .build(),
        };
        Circle::with_center(center, 2 * radius + 1)
            .into_styled(style)
            .draw(&mut self.target)
            .ok();
    }
}

/// Maps each glyph pixel to a `scale.x` by `scale.y` block at `origin`.
struct Scaled<'a, D> {
    target: &'a mut D,
    origin: Point,
    scale: GlyphScale,
}

impl<D> OriginDimensions for Scaled<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn size(&self) -> Size {
        let size = self.target.bounding_box().size;
        Size::new(size.width / self.scale.x, size.height / self.scale.y)
    }
}

impl<D> DrawTarget for Scaled<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (sx, sy) = (self.scale.x as i32, self.scale.y as i32);
        for Pixel(p, color) in pixels {
            let block = Rectangle::new(
                self.origin + Point::new(p.x * sx, p.y * sy),
                Size::new(self.scale.x, self.scale.y),
            );
            self.target.fill_solid(&block, color)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{Op, RecordingPanel};
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    #[test]
    fn test_clear_panel_streams_every_pixel() {
        let mut panel = RecordingPanel::default();
        let area = Rectangle::new(Point::zero(), Size::new(4, 3));
        clear_panel(&mut panel, area, Rgb565::BLACK);

        assert_eq!(panel.ops[0], Op::Window(area));
        assert_eq!(panel.ops.len(), 1 + 12);
        assert!(panel.ops[1..].iter().all(|op| *op == Op::Pixel(Rgb565::BLACK)));
    }

    #[test]
    fn test_stream_fills_window_row_by_row() {
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        let mut panel = GlyphPanel::new(display);

        panel.set_address_window(Rectangle::new(Point::new(1, 1), Size::new(2, 2)));
        for color in [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE, Rgb565::WHITE] {
            panel.stream_pixel(color);
        }

        let display = panel.into_inner();
        assert_eq!(display.get_pixel(Point::new(1, 1)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(2, 1)), Some(Rgb565::GREEN));
        assert_eq!(display.get_pixel(Point::new(1, 2)), Some(Rgb565::BLUE));
        assert_eq!(display.get_pixel(Point::new(2, 2)), Some(Rgb565::WHITE));
        assert_eq!(display.get_pixel(Point::new(3, 1)), None);
    }

    #[test]
    fn test_stream_without_window_is_ignored() {
        let mut panel = GlyphPanel::new(MockDisplay::<Rgb565>::new());
        panel.stream_pixel(Rgb565::RED);
        assert_eq!(panel.target().get_pixel(Point::zero()), None);
    }

    #[test]
    fn test_scaled_glyph_covers_its_cell() {
        let mut panel = GlyphPanel::new(MockDisplay::<Rgb565>::new());
        panel.draw_text(
            Point::new(1, 2),
            GlyphScale::uniform(2),
            "8",
            Rgb565::WHITE,
            Rgb565::BLACK,
        );

        let display = panel.into_inner();
        for y in 2..2 + 16 {
            for x in 1..1 + 10 {
                assert!(display.get_pixel(Point::new(x, y)).is_some(), "({}, {})", x, y);
            }
        }
        assert_eq!(display.get_pixel(Point::new(11, 2)), None);
        assert_eq!(display.get_pixel(Point::new(1, 18)), None);
        assert_eq!(display.get_pixel(Point::new(0, 2)), None);
    }

    #[test]
    fn test_text_cells_leave_one_pixel_gap() {
        let mut panel = GlyphPanel::new(MockDisplay::<Rgb565>::new());
        panel.draw_text(
            Point::zero(),
            GlyphScale::uniform(1),
            "12",
            Rgb565::WHITE,
            Rgb565::BLACK,
        );

        let display = panel.into_inner();
        assert!(display.get_pixel(Point::new(4, 0)).is_some());
        assert_eq!(display.get_pixel(Point::new(5, 0)), None);
        assert!(display.get_pixel(Point::new(6, 0)).is_some());
    }
}
