//! Geometry and layering helpers shared by the layout passes.

use crate::{LayoutGraph, Point};

/// Axis-aligned rectangle given by its center and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        let eps = 1e-6;
        (p.x - self.x).abs() <= self.width / 2.0 + eps
            && (p.y - self.y).abs() <= self.height / 2.0 + eps
    }
}

/// Point where the segment from the center of `rect` towards `point` leaves the rectangle.
///
/// A `point` equal to the center yields the middle of the right side.
pub fn intersect_rect(rect: Rect, point: Point) -> Point {
    let x = rect.x;
    let y = rect.y;

    let dx = point.x - x;
    let dy = point.y - y;
    let mut w = rect.width / 2.0;
    let mut h = rect.height / 2.0;

    if dx == 0.0 && dy == 0.0 {
        return Point { x: x + w, y };
    }

    let (sx, sy) = if dx == 0.0 || dy.abs() * w > dx.abs() * h {
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        if dx < 0.0 {
            w = -w;
        }
        (w, w * dy / dx)
    };

    Point {
        x: x + sx,
        y: y + sy,
    }
}

/// Groups node ids by rank, each layer sorted by `order` (ties keep insertion order).
pub fn build_layer_matrix(g: &LayoutGraph) -> Vec<Vec<String>> {
    let mut max_rank: i32 = -1;
    let mut entries: Vec<(i32, usize, String)> = Vec::new();
    for id in g.nodes() {
        let Some(node) = g.node(id) else {
            continue;
        };
        let Some(rank) = node.rank else {
            continue;
        };
        max_rank = max_rank.max(rank);
        entries.push((rank, node.order.unwrap_or(0), id.to_string()));
    }

    let mut layers: Vec<Vec<(usize, String)>> = vec![Vec::new(); (max_rank + 1).max(0) as usize];
    for (rank, order, id) in entries {
        if let Some(layer) = layers.get_mut(rank.max(0) as usize) {
            layer.push((order, id));
        }
    }

    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|(order, _)| *order);
            layer.into_iter().map(|(_, id)| id).collect()
        })
        .collect()
}

/// Returns `"{prefix}{n}"` for the first `n >= node_count` not already taken.
pub fn fresh_node_id(g: &LayoutGraph, prefix: &str) -> String {
    let mut n = g.node_count();
    loop {
        let id = format!("{prefix}{n}");
        if !g.has_node(&id) {
            return id;
        }
        n += 1;
    }
}

/// Smallest and largest values of an iterator of finite numbers.
pub fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
