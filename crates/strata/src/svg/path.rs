use super::util::{fmt_point_into, num_attr_into};
use crate::attrs::{Curve, Shape};
use crate::positioned::Point;

/// Path data for an edge.
///
/// `Straight` joins the points with line segments. `Quadratic` uses every interior point as the
/// control point of a quadratic segment ending halfway to the next point, so the curve passes
/// smoothly near the routing points and still starts and ends on the outlines.
pub(super) fn edge_path_data(points: &[Point], curve: Curve) -> String {
    let mut d = String::new();
    let Some(first) = points.first() else {
        return d;
    };
    d.push('M');
    fmt_point_into(&mut d, first.x, first.y);

    if curve == Curve::Straight || points.len() < 3 {
        for p in &points[1..] {
            d.push('L');
            fmt_point_into(&mut d, p.x, p.y);
        }
        return d;
    }

    for pair in points[1..].windows(2) {
        let (ctrl, next) = (pair[0], pair[1]);
        d.push('Q');
        fmt_point_into(&mut d, ctrl.x, ctrl.y);
        d.push(' ');
        fmt_point_into(&mut d, (ctrl.x + next.x) / 2.0, (ctrl.y + next.y) / 2.0);
    }
    if let Some(last) = points.last() {
        d.push('L');
        fmt_point_into(&mut d, last.x, last.y);
    }
    d
}

/// Appends the outline element for a vertex centered at `(cx, cy)`, leaving the element open
/// so the caller can add paint attributes. Returns `false` for shapes without an outline.
pub(super) fn open_shape_into(
    out: &mut String,
    shape: Shape,
    cx: f64,
    cy: f64,
    w: f64,
    h: f64,
) -> bool {
    let (left, top) = (cx - w / 2.0, cy - h / 2.0);
    let (right, bottom) = (cx + w / 2.0, cy + h / 2.0);
    match shape {
        Shape::Rectangle | Shape::Square => {
            out.push_str("<rect");
            num_attr_into(out, "x", left);
            num_attr_into(out, "y", top);
            num_attr_into(out, "width", w);
            num_attr_into(out, "height", h);
        }
        Shape::Circle => {
            out.push_str("<circle");
            num_attr_into(out, "cx", cx);
            num_attr_into(out, "cy", cy);
            num_attr_into(out, "r", w.min(h) / 2.0);
        }
        Shape::Ellipse => {
            out.push_str("<ellipse");
            num_attr_into(out, "cx", cx);
            num_attr_into(out, "cy", cy);
            num_attr_into(out, "rx", w / 2.0);
            num_attr_into(out, "ry", h / 2.0);
        }
        Shape::Diamond => {
            polygon_into(out, &[(cx, top), (right, cy), (cx, bottom), (left, cy)]);
        }
        Shape::Triangle => {
            polygon_into(out, &[(cx, top), (right, bottom), (left, bottom)]);
        }
        Shape::Underline => {
            line_into(out, left, bottom, right, bottom);
        }
        Shape::Plaintext | Shape::None => return false,
    }
    true
}

fn polygon_into(out: &mut String, corners: &[(f64, f64)]) {
    out.push_str("<polygon points=\"");
    for (i, &(x, y)) in corners.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        fmt_point_into(out, x, y);
    }
    out.push('"');
}

pub(super) fn line_into(out: &mut String, x1: f64, y1: f64, x2: f64, y2: f64) {
    out.push_str("<line");
    num_attr_into(out, "x1", x1);
    num_attr_into(out, "y1", y1);
    num_attr_into(out, "x2", x2);
    num_attr_into(out, "y2", y2);
}

/// Baselines for `lines` lines of text centered vertically on `cy`.
pub(super) fn line_centers(cy: f64, lines: usize, line_height: f64) -> impl Iterator<Item = f64> {
    let first = cy - (lines as f64 - 1.0) * line_height / 2.0;
    (0..lines).map(move |i| first + i as f64 * line_height)
}
