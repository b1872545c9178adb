//! Build-time configuration: panel geometry, field layout, colors and the
//! view variant.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{Point, RgbColor, Size},
    primitives::Rectangle,
};

use crate::debounce::DebounceConfig;
use crate::mode::Variant;
use crate::render::{FieldSpec, GlyphScale};

/// Views this build cycles through
#[cfg(not(feature = "twelve-hour"))]
pub const VARIANT: Variant = Variant::Pedometer;
#[cfg(feature = "twelve-hour")]
pub const VARIANT: Variant = Variant::TwelveHour;

/// Region of the panel the watch face owns
pub const PANEL: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(96, 96));

pub const BACKGROUND: Rgb565 = Rgb565::BLACK;

pub const DEBOUNCE: DebounceConfig = DebounceConfig::DEFAULT;

/// Layout of the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub time: FieldSpec,
    pub meridiem: FieldSpec,
    pub date: FieldSpec,
    pub steps: FieldSpec,
    pub icon_center: Point,
    pub icon_radius: u32,
    pub icon_ring_width: u32,
    pub icon_color: Rgb565,
    pub background: Rgb565,
}

impl Layout {
    /// Box the icon is drawn in and cleared from
    pub const fn icon_box(&self) -> Rectangle {
        let side = 2 * self.icon_radius + 1;
        Rectangle::new(
            Point::new(
                self.icon_center.x - self.icon_radius as i32,
                self.icon_center.y - self.icon_radius as i32,
            ),
            Size::new(side, side),
        )
    }
}

pub const LAYOUT: Layout = Layout {
    // "HH:MM:SS" at 2x spans 87 px
    time: FieldSpec {
        origin: Point::new(2, 2),
        scale: GlyphScale::uniform(2),
        fg: Rgb565::WHITE,
        bg: BACKGROUND,
    },
    meridiem: FieldSpec {
        origin: Point::new(4, 20),
        scale: GlyphScale::uniform(1),
        fg: Rgb565::CYAN,
        bg: BACKGROUND,
    },
    date: FieldSpec {
        origin: Point::new(4, 30),
        scale: GlyphScale::uniform(1),
        fg: Rgb565::YELLOW,
        bg: BACKGROUND,
    },
    steps: FieldSpec {
        origin: Point::new(2, 56),
        scale: GlyphScale::uniform(1),
        fg: Rgb565::WHITE,
        bg: BACKGROUND,
    },
    icon_center: Point::new(15, 40),
    icon_radius: 10,
    icon_ring_width: 2,
    icon_color: Rgb565::GREEN,
    background: BACKGROUND,
};
