//! Watch face: maps a view onto the text fields and the pedometer icon.
//!
//! Fields a view does not show are hidden before the fields it does show are
//! drawn, so a view switch never paints over content that is about to be
//! cleared.

use core::fmt::Write;

use heapless::String;

use crate::clock::WatchTime;
use crate::config::Layout;
use crate::display::{CircleStyle, PanelDriver};
use crate::mode::View;
use crate::render::{TextField, FIELD_CAPACITY};

#[derive(Debug, Clone)]
pub struct WatchFace {
    layout: Layout,
    time: TextField,
    meridiem: TextField,
    date: TextField,
    steps: TextField,
    /// Icon currently drawn: `Some(filled)`, or `None` when hidden
    icon: Option<bool>,
}

impl WatchFace {
    pub const fn new(layout: Layout) -> Self {
        Self {
            layout,
            time: TextField::new(layout.time),
            meridiem: TextField::new(layout.meridiem),
            date: TextField::new(layout.date),
            steps: TextField::new(layout.steps),
            icon: None,
        }
    }

    pub fn render<P: PanelDriver>(
        &mut self,
        panel: &mut P,
        view: View,
        time: &WatchTime,
        steps: u32,
        animation: bool,
    ) {
        match view {
            View::TimeDate | View::Hour24 => {
                self.meridiem.hide(panel);
                self.steps.hide(panel);
                self.hide_icon(panel);
                self.time.render(panel, &time.time_24());
                self.date.render(panel, &time.date());
            }
            View::Hour12 => {
                self.steps.hide(panel);
                self.hide_icon(panel);
                let (text, meridiem) = time.time_12();
                self.time.render(panel, &text);
                self.meridiem.render(panel, meridiem.as_str());
                self.date.render(panel, &time.date());
            }
            View::Pedometer => {
                self.meridiem.hide(panel);
                self.date.hide(panel);
                self.time.render(panel, &time.time_24());
                self.show_icon(panel, animation);
                self.steps.render(panel, &steps_text(steps));
            }
        }
    }

    /// Forgets everything drawn, for use after the panel was cleared.
    pub fn invalidate(&mut self) {
        self.time.invalidate();
        self.meridiem.invalidate();
        self.date.invalidate();
        self.steps.invalidate();
        self.icon = None;
    }

    fn show_icon<P: PanelDriver>(&mut self, panel: &mut P, filled: bool) {
        if self.icon == Some(filled) {
            return;
        }

        let layout = &self.layout;
        panel.fill_rect(layout.icon_box(), layout.background);
        let style = if filled {
            CircleStyle::Filled
        } else {
            CircleStyle::Ring(layout.icon_ring_width)
        };
        panel.draw_circle(layout.icon_center, layout.icon_radius, style, layout.icon_color);
        self.icon = Some(filled);
    }

    fn hide_icon<P: PanelDriver>(&mut self, panel: &mut P) {
        if self.icon.take().is_some() {
            panel.fill_rect(self.layout.icon_box(), self.layout.background);
        }
    }
}

fn steps_text(steps: u32) -> String<FIELD_CAPACITY> {
    let mut text = String::new();
    let _ = write!(text, "Steps: {}", steps);
    text
}
