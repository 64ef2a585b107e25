//! Edge endpoints and label anchors.

use crate::util::{Rect, intersect_rect};
use crate::{LabelPos, LayoutGraph, Point};

/// Clips both ends of every edge to its endpoint rectangles.
///
/// The first point is where the segment from the source center towards the first routing
/// point leaves the source; the last point likewise for the target. Edges without routing
/// points aim at the other endpoint's center.
pub fn assign_node_intersects(g: &mut LayoutGraph) {
    for e in g.edge_keys() {
        let (Some(v), Some(w)) = (g.node(&e.v), g.node(&e.w)) else {
            continue;
        };
        let (Some(vx), Some(vy), Some(wx), Some(wy)) = (v.x, v.y, w.x, w.y) else {
            continue;
        };
        let v_rect = Rect {
            x: vx,
            y: vy,
            width: v.width,
            height: v.height,
        };
        let w_rect = Rect {
            x: wx,
            y: wy,
            width: w.width,
            height: w.height,
        };
        let Some(label) = g.edge_mut_by_key(&e) else {
            continue;
        };

        let toward_first = label.points.first().copied().unwrap_or(Point { x: wx, y: wy });
        let toward_last = label.points.last().copied().unwrap_or(Point { x: vx, y: vy });
        label.points.insert(0, intersect_rect(v_rect, toward_first));
        label.points.push(intersect_rect(w_rect, toward_last));
    }
}

/// Moves `L`/`R` label anchors off the edge path by half the label width plus the offset.
/// Runs in the top-to-bottom frame, where the order axis is `x`.
pub fn fixup_edge_label_coords(g: &mut LayoutGraph) {
    g.for_each_edge_mut(|_, e| {
        if e.self_loop {
            return;
        }
        let Some(x) = e.x else {
            return;
        };
        if e.labelpos != LabelPos::C {
            e.width -= e.labeloffset;
        }
        match e.labelpos {
            LabelPos::L => e.x = Some(x - e.width / 2.0 - e.labeloffset),
            LabelPos::R => e.x = Some(x + e.width / 2.0 + e.labeloffset),
            LabelPos::C => {}
        }
    });
}

/// Gives every edge that has no label anchor yet one at the arc-length midpoint of its path,
/// shifted along the order axis for `L`/`R` placement.
pub fn assign_label_anchors(g: &mut LayoutGraph) {
    let horizontal = g.graph().rankdir.is_horizontal();
    g.for_each_edge_mut(|_, e| {
        if e.x.is_some() && e.y.is_some() {
            return;
        }
        let Some(mid) = path_midpoint(&e.points) else {
            return;
        };
        let shift = match e.labelpos {
            LabelPos::L => -(e.width / 2.0 + e.labeloffset),
            LabelPos::R => e.width / 2.0 + e.labeloffset,
            LabelPos::C => 0.0,
        };
        let (x, y) = if horizontal {
            (mid.x, mid.y + shift)
        } else {
            (mid.x + shift, mid.y)
        };
        e.x = Some(x);
        e.y = Some(y);
    });
}

/// Point halfway along a polyline, measured by length.
pub fn path_midpoint(points: &[Point]) -> Option<Point> {
    let first = *points.first()?;
    let total: f64 = points
        .windows(2)
        .map(|s| (s[1].x - s[0].x).hypot(s[1].y - s[0].y))
        .sum();
    if total == 0.0 {
        return Some(first);
    }
    let mut remaining = total / 2.0;
    for s in points.windows(2) {
        let len = (s[1].x - s[0].x).hypot(s[1].y - s[0].y);
        if len > 0.0 && remaining <= len {
            return Some(Point {
                x: s[0].x + (s[1].x - s[0].x) * remaining / len,
                y: s[0].y + (s[1].y - s[0].y) * remaining / len,
            });
        }
        remaining -= len;
    }
    points.last().copied()
}
