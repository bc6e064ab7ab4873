//! Art provider interface.
//!
//! The layout engine only needs a handful of metrics from the art provider.
//! Painting goes through [`DockArt::draw_part`] into a host-supplied
//! [`Canvas`]; the engine never draws by itself.

use dockwork_core::geometry::Rect;

use crate::pane::{ButtonKind, PaneInfo};
use crate::part::{UiPart, UiPartKind};

/// Numeric metrics an art provider exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtMetric {
    SashSize,
    CaptionSize,
    GripperSize,
    PaneBorderSize,
    PaneButtonSize,
}

/// Colour roles an art provider exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtColor {
    Background,
    Sash,
    ActiveCaption,
    InactiveCaption,
    ActiveCaptionText,
    InactiveCaptionText,
    Border,
    Gripper,
}

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Drawing context handed to the art provider by the host.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn stroke_rect(&mut self, rect: Rect, color: Rgba);
    fn draw_text(&mut self, rect: Rect, text: &str, color: Rgba);
}

/// Measures and paints dock decorations.
pub trait DockArt {
    fn metric(&self, metric: ArtMetric) -> i32;
    fn set_metric(&mut self, metric: ArtMetric, value: i32);
    fn color(&self, color: ArtColor) -> Rgba;
    /// Paint one part. `pane` is the part's pane, when it has one.
    fn draw_part(&self, canvas: &mut dyn Canvas, part: &UiPart, pane: Option<&PaneInfo>);
}

/// Snapshot of the metrics used by one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtMetrics {
    pub sash_size: i32,
    pub caption_size: i32,
    pub gripper_size: i32,
    pub pane_border_size: i32,
    pub pane_button_size: i32,
}

impl ArtMetrics {
    #[must_use]
    pub fn from_art(art: &dyn DockArt) -> Self {
        Self {
            sash_size: art.metric(ArtMetric::SashSize),
            caption_size: art.metric(ArtMetric::CaptionSize),
            gripper_size: art.metric(ArtMetric::GripperSize),
            pane_border_size: art.metric(ArtMetric::PaneBorderSize),
            pane_button_size: art.metric(ArtMetric::PaneButtonSize),
        }
    }
}

impl Default for ArtMetrics {
    fn default() -> Self {
        Self::from_art(&DefaultDockArt::new())
    }
}

/// Flat-colour art with conventional metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultDockArt {
    sash_size: i32,
    caption_size: i32,
    gripper_size: i32,
    pane_border_size: i32,
    pane_button_size: i32,
}

impl Default for DefaultDockArt {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultDockArt {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sash_size: 4,
            caption_size: 17,
            gripper_size: 9,
            pane_border_size: 1,
            pane_button_size: 14,
        }
    }
}

impl DockArt for DefaultDockArt {
    fn metric(&self, metric: ArtMetric) -> i32 {
        match metric {
            ArtMetric::SashSize => self.sash_size,
            ArtMetric::CaptionSize => self.caption_size,
            ArtMetric::GripperSize => self.gripper_size,
            ArtMetric::PaneBorderSize => self.pane_border_size,
            ArtMetric::PaneButtonSize => self.pane_button_size,
        }
    }

    fn set_metric(&mut self, metric: ArtMetric, value: i32) {
        let value = value.max(0);
        match metric {
            ArtMetric::SashSize => self.sash_size = value,
            ArtMetric::CaptionSize => self.caption_size = value,
            ArtMetric::GripperSize => self.gripper_size = value,
            ArtMetric::PaneBorderSize => self.pane_border_size = value,
            ArtMetric::PaneButtonSize => self.pane_button_size = value,
        }
    }

    fn color(&self, color: ArtColor) -> Rgba {
        match color {
            ArtColor::Background | ArtColor::Sash => Rgba::rgb(0xd4, 0xd0, 0xc8),
            ArtColor::ActiveCaption => Rgba::rgb(0x31, 0x6a, 0xc5),
            ArtColor::InactiveCaption => Rgba::rgb(0xa0, 0xa0, 0xa0),
            ArtColor::ActiveCaptionText => Rgba::rgb(0xff, 0xff, 0xff),
            ArtColor::InactiveCaptionText => Rgba::rgb(0x00, 0x00, 0x00),
            ArtColor::Border => Rgba::rgb(0x80, 0x80, 0x80),
            ArtColor::Gripper => Rgba::rgb(0xc0, 0xc0, 0xc0),
        }
    }

    fn draw_part(&self, canvas: &mut dyn Canvas, part: &UiPart, pane: Option<&PaneInfo>) {
        let active = pane.is_some_and(|p| p.has_flag(crate::pane::PaneFlags::ACTIVE));
        match part.kind {
            UiPartKind::Background => canvas.fill_rect(part.rect, self.color(ArtColor::Background)),
            UiPartKind::DockSizer | UiPartKind::PaneSizer => {
                canvas.fill_rect(part.rect, self.color(ArtColor::Sash));
            }
            UiPartKind::Gripper => canvas.fill_rect(part.rect, self.color(ArtColor::Gripper)),
            UiPartKind::Caption => {
                let (fill, text) = if active {
                    (ArtColor::ActiveCaption, ArtColor::ActiveCaptionText)
                } else {
                    (ArtColor::InactiveCaption, ArtColor::InactiveCaptionText)
                };
                canvas.fill_rect(part.rect, self.color(fill));
                if let Some(pane) = pane {
                    canvas.draw_text(part.rect, &pane.caption, self.color(text));
                }
            }
            UiPartKind::PaneButton => {
                let Some(kind) = pane
                    .zip(part.button)
                    .and_then(|(pane, button)| pane.buttons.get(button))
                    .map(|button| button.kind)
                else {
                    return;
                };
                let glyph = match kind {
                    ButtonKind::Close => "x",
                    ButtonKind::MaximizeRestore if pane.is_some_and(PaneInfo::is_maximized) => "=",
                    ButtonKind::MaximizeRestore => "+",
                    ButtonKind::Minimize => "_",
                    ButtonKind::Pin => "^",
                };
                let color = if active {
                    ArtColor::ActiveCaptionText
                } else {
                    ArtColor::InactiveCaptionText
                };
                canvas.draw_text(part.rect, glyph, self.color(color));
            }
            UiPartKind::PaneBorder => canvas.stroke_rect(part.rect, self.color(ArtColor::Border)),
            UiPartKind::Pane | UiPartKind::Dock => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::{PaneButton, PaneInfo};
    use crate::sizer::Orientation;

    #[derive(Default)]
    struct Recorder {
        ops: Vec<String>,
    }

    impl Canvas for Recorder {
        fn fill_rect(&mut self, rect: Rect, _color: Rgba) {
            self.ops.push(format!("fill {},{}", rect.x, rect.y));
        }

        fn stroke_rect(&mut self, rect: Rect, _color: Rgba) {
            self.ops.push(format!("stroke {},{}", rect.x, rect.y));
        }

        fn draw_text(&mut self, _rect: Rect, text: &str, _color: Rgba) {
            self.ops.push(format!("text {text}"));
        }
    }

    #[test]
    fn default_metrics() {
        let metrics = ArtMetrics::default();
        assert_eq!(metrics.sash_size, 4);
        assert_eq!(metrics.caption_size, 17);
        assert_eq!(metrics.gripper_size, 9);
        assert_eq!(metrics.pane_border_size, 1);
        assert_eq!(metrics.pane_button_size, 14);
    }

    #[test]
    fn set_metric_clamps_negative() {
        let mut art = DefaultDockArt::new();
        art.set_metric(ArtMetric::CaptionSize, 22);
        art.set_metric(ArtMetric::SashSize, -3);
        let metrics = ArtMetrics::from_art(&art);
        assert_eq!(metrics.caption_size, 22);
        assert_eq!(metrics.sash_size, 0);
    }

    #[test]
    fn caption_draws_fill_then_text() {
        let art = DefaultDockArt::new();
        let pane = PaneInfo::new().caption("Output");
        let mut part = UiPart::new(UiPartKind::Caption, 0, Orientation::Horizontal);
        part.rect = Rect::new(3, 4, 50, 17);
        let mut canvas = Recorder::default();
        art.draw_part(&mut canvas, &part, Some(&pane));
        assert_eq!(canvas.ops, vec!["fill 3,4", "text Output"]);
    }

    #[test]
    fn button_glyph_follows_button_kind() {
        let art = DefaultDockArt::new();
        let mut pane = PaneInfo::new();
        pane.buttons = vec![PaneButton {
            kind: ButtonKind::Close,
        }];
        let part = UiPart::new(UiPartKind::PaneButton, 0, Orientation::Horizontal).with_button(0);
        let mut canvas = Recorder::default();
        art.draw_part(&mut canvas, &part, Some(&pane));
        assert_eq!(canvas.ops, vec!["text x"]);
    }

    #[test]
    fn pane_body_is_not_painted() {
        let art = DefaultDockArt::new();
        let part = UiPart::new(UiPartKind::Pane, 0, Orientation::Vertical);
        let mut canvas = Recorder::default();
        art.draw_part(&mut canvas, &part, None);
        assert!(canvas.ops.is_empty());
    }
}
