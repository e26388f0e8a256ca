use crate::coords::Rect;
use crate::paint::Color;

/// Paint layer for overlay quads. Higher layers are drawn on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Layer(pub u8);

impl Layer {
    pub const BACKDROP: Layer = Layer(0);
    pub const CONTENT: Layer = Layer(1);
    pub const HIGHLIGHT: Layer = Layer(2);
}

/// Solid, axis-aligned quad in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub rect: Rect,
    /// Premultiplied.
    pub color: Color,
}

/// Screen-space quads recorded for one frame.
///
/// Paint order is layer first, then insertion order within a layer.
#[derive(Debug, Default)]
pub struct OverlayList {
    items: Vec<(Layer, u32, Quad)>,
    next_order: u32,
    sorted: bool,
}

impl OverlayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded quads. Keeps allocated capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted = true;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records a quad. Empty or fully transparent quads are dropped.
    pub fn push(&mut self, layer: Layer, rect: Rect, color: Color) {
        if rect.is_empty() || color.a <= 0.0 {
            return;
        }
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push((layer, order, Quad { rect, color }));
        self.sorted = false;
    }

    /// Iterates quads back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &Quad> {
        if !self.sorted {
            self.items.sort_by_key(|(layer, order, _)| (*layer, *order));
            self.sorted = true;
        }
        self.items.iter().map(|(_, _, q)| q)
    }
}
