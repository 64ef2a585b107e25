//! Vertex and edge-label measurement.
//!
//! Layout needs a box for every vertex and every labeled edge. Explicit `shape_w`/`shape_h`
//! always win; otherwise a [`SizeProvider`] measures the label. [`DeterministicSizer`] estimates
//! text extents from the font size alone, so results are identical on every machine.

use crate::attrs::{EdgeAttrs, Shape, VertexAttrs};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Supplies outline sizes for elements without explicit dimensions.
pub trait SizeProvider {
    /// Outline size of a vertex. `id` is the vertex identity, used as label text when the
    /// vertex has no label.
    fn vertex_size(&self, id: &str, attrs: &VertexAttrs) -> Size;

    /// Size of an edge's label box; zero when the edge has nothing to show.
    fn edge_label_size(&self, attrs: &EdgeAttrs) -> Size;
}

/// Font-metric-free text measurement: every column is `char_width_factor * font_size` wide and
/// every line `line_height_factor * font_size` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeterministicSizer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl Default for DeterministicSizer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
            line_height_factor: 1.2,
        }
    }
}

/// Padding between an edge label and its box decoration, per side.
const EDGE_LABEL_PADDING: f64 = 4.0;

impl DeterministicSizer {
    pub fn measure_text(&self, text: &str, font_size: f64) -> Size {
        let font_size = font_size.max(1.0);
        let lines = text_lines(text);
        let columns = lines.iter().map(|l| l.width()).max().unwrap_or(0);
        Size {
            width: columns as f64 * font_size * self.char_width_factor,
            height: lines.len() as f64 * font_size * self.line_height_factor,
        }
    }
}

impl SizeProvider for DeterministicSizer {
    fn vertex_size(&self, id: &str, attrs: &VertexAttrs) -> Size {
        let text = attrs.render.label.as_deref().unwrap_or(id);
        let text = self.measure_text(text, attrs.render.font_size);
        let margins = attrs.layout.margins;
        let w = text.width + 2.0 * margins.x;
        let h = text.height + 2.0 * margins.y;
        shape_extent(attrs.render.shape, w, h)
    }

    fn edge_label_size(&self, attrs: &EdgeAttrs) -> Size {
        let Some(label) = attrs.render.label.as_deref().filter(|l| !l.is_empty()) else {
            return Size::default();
        };
        let text = self.measure_text(label, attrs.render.font_size);
        Size {
            width: text.width + 2.0 * EDGE_LABEL_PADDING,
            height: text.height + 2.0 * EDGE_LABEL_PADDING,
        }
    }
}

/// Grows a label box so that the shape drawn around it contains it.
pub fn shape_extent(shape: Shape, w: f64, h: f64) -> Size {
    match shape {
        Shape::Circle => {
            let d = w.hypot(h);
            Size {
                width: d,
                height: d,
            }
        }
        Shape::Square => {
            let side = w.max(h);
            Size {
                width: side,
                height: side,
            }
        }
        Shape::Ellipse => Size {
            width: w * std::f64::consts::SQRT_2,
            height: h * std::f64::consts::SQRT_2,
        },
        Shape::Diamond | Shape::Triangle => Size {
            width: w * 2.0,
            height: h * 2.0,
        },
        Shape::Rectangle | Shape::Plaintext | Shape::Underline | Shape::None => Size {
            width: w,
            height: h,
        },
    }
}

/// Splits a label into display lines.
pub fn text_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}
