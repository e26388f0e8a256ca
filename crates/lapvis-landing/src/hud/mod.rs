//! Telemetry overlay and enter button, drawn as flat quads over the grid.

mod segments;
mod text;

pub use segments::{number_width, push_number};
pub use text::{push_text, text_height, text_width};

use lapvis_engine::coords::{Rect, Vec2, Viewport};
use lapvis_engine::paint::Color;
use lapvis_engine::scene::{Layer, OverlayList};

use crate::telemetry::{Readout, SPEED_RANGE};

const MARGIN: f32 = 24.0;
const PANEL_SIZE: Vec2 = Vec2::new(220.0, 156.0);
const PANEL_PAD: f32 = 16.0;
const BUTTON_SIZE: Vec2 = Vec2::new(240.0, 56.0);
const DIGIT_HEIGHT: f32 = 36.0;
const GAUGE_HEIGHT: f32 = 6.0;
const TAG_SIZE: f32 = 8.0;
const OUTLINE: f32 = 2.0;
const LABEL_PX: f32 = 2.0;
const UNIT_PX: f32 = 1.5;
const CAPTION_PX: f32 = 1.5;
const LABEL_INSET: f32 = TAG_SIZE + 8.0;

pub const IDLE_CAPTION: &str = "ENTER";
pub const LOADING_CAPTION: &str = "LOADING TELEMETRY...";

const BRAKE_FULL_SCALE: f32 = 40.0;
const GEAR_FULL_SCALE: f32 = 8.0;

/// HUD palette, premultiplied.
pub struct Palette;

impl Palette {
    pub fn panel() -> Color {
        Color::from_straight(0.02, 0.05, 0.08, 0.72)
    }
    pub fn accent() -> Color {
        Color::rgb(0.0, 0.9, 1.0)
    }
    pub fn digits() -> Color {
        Color::rgb(0.85, 0.97, 1.0)
    }
    pub fn gauge_track() -> Color {
        Color::from_straight(1.0, 1.0, 1.0, 0.08)
    }
    pub fn throttle() -> Color {
        Color::rgb(0.2, 0.95, 0.45)
    }
    pub fn brake() -> Color {
        Color::rgb(1.0, 0.25, 0.3)
    }
    pub fn gear() -> Color {
        Color::rgb(1.0, 0.75, 0.2)
    }
    pub fn label() -> Color {
        Palette::digits().fade(0.6)
    }
}

/// How the enter button looks this frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ButtonVisual {
    Idle,
    Hover,
    /// `progress` and `pulse` are in `[0, 1]`.
    Loading { progress: f32, pulse: f32 },
}

/// Screen placement of the HUD parts, in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HudLayout {
    pub left_panel: Rect,
    pub right_panel: Rect,
    pub button: Rect,
}

impl HudLayout {
    pub fn new(viewport: Viewport) -> Self {
        let (w, h) = (viewport.width, viewport.height);
        let left_panel = Rect::new(MARGIN, MARGIN, PANEL_SIZE.x, PANEL_SIZE.y);
        let right_panel = Rect::new(
            (w - MARGIN - PANEL_SIZE.x).max(MARGIN),
            MARGIN,
            PANEL_SIZE.x,
            PANEL_SIZE.y,
        );
        let button = Rect::centered(
            Vec2::new(w * 0.5, h - MARGIN * 2.0 - BUTTON_SIZE.y * 0.5),
            BUTTON_SIZE,
        );
        Self { left_panel, right_panel, button }
    }
}

/// One labelled readout with its gauge.
struct Gauge {
    label: &'static str,
    unit: Option<&'static str>,
    value: u32,
    fraction: f32,
    color: Color,
}

fn gauges(readout: &Readout) -> [Gauge; 4] {
    let speed_span = SPEED_RANGE.end() - SPEED_RANGE.start();
    [
        Gauge {
            label: "SPEED",
            unit: Some("KM/H"),
            value: readout.speed_kmh,
            fraction: (readout.speed_kmh as f32 - SPEED_RANGE.start()) / speed_span,
            color: Palette::accent(),
        },
        Gauge {
            label: "THROTTLE",
            unit: Some("%"),
            value: readout.throttle_pct,
            fraction: readout.throttle_pct as f32 / 100.0,
            color: Palette::throttle(),
        },
        Gauge {
            label: "BRAKE",
            unit: Some("%"),
            value: readout.brake_pct,
            fraction: readout.brake_pct as f32 / BRAKE_FULL_SCALE,
            color: Palette::brake(),
        },
        Gauge {
            label: "GEAR",
            unit: None,
            value: readout.gear as u32,
            fraction: readout.gear as f32 / GEAR_FULL_SCALE,
            color: Palette::gear(),
        },
    ]
}

/// Records the full HUD into `list`.
pub fn build(list: &mut OverlayList, layout: &HudLayout, readout: &Readout, button: ButtonVisual) {
    let [speed, throttle, brake, gear] = gauges(readout);

    panel(list, layout.left_panel);
    let rows = panel_rows(layout.left_panel);
    gauge_row(list, rows[0], &speed);
    gauge_row(list, rows[1], &throttle);

    panel(list, layout.right_panel);
    let rows = panel_rows(layout.right_panel);
    gauge_row(list, rows[0], &brake);
    gauge_row(list, rows[1], &gear);

    enter_button(list, layout.button, button);
}

fn panel(list: &mut OverlayList, rect: Rect) {
    list.push(Layer::BACKDROP, rect, Palette::panel());
    // Accent strip along the top edge.
    list.push(
        Layer::CONTENT,
        Rect::new(rect.origin.x, rect.origin.y, rect.size.x, OUTLINE),
        Palette::accent().fade(0.8),
    );
}

fn panel_rows(panel: Rect) -> [Rect; 2] {
    let inner = panel.inflate(-PANEL_PAD);
    let row_h = inner.size.y * 0.5;
    [
        Rect::new(inner.origin.x, inner.origin.y, inner.size.x, row_h),
        Rect::new(inner.origin.x, inner.origin.y + row_h, inner.size.x, row_h),
    ]
}

/// Colored tag with label and unit, right-aligned digits, gauge bar underneath.
fn gauge_row(list: &mut OverlayList, row: Rect, gauge: &Gauge) {
    let color = gauge.color;
    let tag = Rect::new(row.origin.x, row.origin.y + (DIGIT_HEIGHT - TAG_SIZE) * 0.5, TAG_SIZE, TAG_SIZE);
    list.push(Layer::CONTENT, tag, color);

    let label_at = Vec2::new(row.origin.x + LABEL_INSET, row.origin.y + 4.0);
    push_text(list, Layer::CONTENT, label_at, LABEL_PX, gauge.label, Palette::label());
    if let Some(unit) = gauge.unit {
        let unit_at = Vec2::new(label_at.x, label_at.y + text_height(LABEL_PX) + 4.0);
        push_text(list, Layer::CONTENT, unit_at, UNIT_PX, unit, color);
    }

    let digits_w = number_width(gauge.value, DIGIT_HEIGHT);
    let at = Vec2::new(row.max().x - digits_w, row.origin.y);
    push_number(list, Layer::CONTENT, at, DIGIT_HEIGHT, gauge.value, Palette::digits());

    let track = Rect::new(
        row.origin.x,
        row.origin.y + DIGIT_HEIGHT + 8.0,
        row.size.x,
        GAUGE_HEIGHT,
    );
    list.push(Layer::CONTENT, track, Palette::gauge_track());

    let fill = Rect::new(
        track.origin.x,
        track.origin.y,
        track.size.x * gauge.fraction.clamp(0.0, 1.0),
        track.size.y,
    );
    list.push(Layer::HIGHLIGHT, fill, color);
}

fn enter_button(list: &mut OverlayList, rect: Rect, visual: ButtonVisual) {
    let accent = Palette::accent();
    let (fill, edge) = match visual {
        ButtonVisual::Idle => (accent.fade(0.12), accent.fade(0.7)),
        ButtonVisual::Hover => (accent.fade(0.28), accent),
        ButtonVisual::Loading { pulse, .. } => {
            let p = pulse.clamp(0.0, 1.0);
            (accent.fade(0.15 + 0.25 * p), accent.fade(0.6 + 0.4 * p))
        }
    };

    list.push(Layer::BACKDROP, rect, Palette::panel());
    list.push(Layer::CONTENT, rect, fill);
    outline(list, rect, OUTLINE, edge);

    let caption = match visual {
        ButtonVisual::Loading { .. } => LOADING_CAPTION,
        ButtonVisual::Idle | ButtonVisual::Hover => IDLE_CAPTION,
    };
    push_text(list, Layer::HIGHLIGHT, caption_origin(rect, caption), CAPTION_PX, caption, edge);

    if let ButtonVisual::Loading { progress, .. } = visual {
        let inner = rect.inflate(-OUTLINE);
        let bar = Rect::new(
            inner.origin.x,
            inner.max().y - 4.0,
            inner.size.x * progress.clamp(0.0, 1.0),
            4.0,
        );
        list.push(Layer::HIGHLIGHT, bar, accent);
    }
}

/// Top-left of `caption` centered in `rect`.
fn caption_origin(rect: Rect, caption: &str) -> Vec2 {
    let c = rect.center();
    Vec2::new(
        c.x - text_width(caption, CAPTION_PX) * 0.5,
        c.y - text_height(CAPTION_PX) * 0.5,
    )
}

fn outline(list: &mut OverlayList, r: Rect, t: f32, color: Color) {
    let max = r.max();
    list.push(Layer::HIGHLIGHT, Rect::new(r.origin.x, r.origin.y, r.size.x, t), color);
    list.push(Layer::HIGHLIGHT, Rect::new(r.origin.x, max.y - t, r.size.x, t), color);
    list.push(Layer::HIGHLIGHT, Rect::new(r.origin.x, r.origin.y + t, t, r.size.y - 2.0 * t), color);
    list.push(Layer::HIGHLIGHT, Rect::new(max.x - t, r.origin.y + t, t, r.size.y - 2.0 * t), color);
}
