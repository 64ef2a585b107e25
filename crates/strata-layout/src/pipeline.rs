use crate::util::min_max;
use crate::{
    LayoutGraph, Result, acyclic, check, coordinate_system, normalize, order, position, rank,
    route, self_edges,
};

/// Runs the full layout pipeline in place.
///
/// On return every node has `x`/`y`, every edge has `points` (at least two, starting and ending
/// on the endpoint rectangles) and a label anchor `x`/`y`, and the graph label carries the
/// drawing's `width`/`height`. Content is translated so its top-left corner sits at
/// (`marginx`, `marginy`).
pub fn layout(g: &mut LayoutGraph) -> Result<()> {
    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        "layout: start"
    );

    rank::make_space_for_edge_labels(g);
    self_edges::remove_self_edges(g);
    acyclic::run(g);
    rank::longest_path(g)?;
    rank::assign_label_ranks(g);
    normalize::run(g);
    check::check_layering(g)?;

    order::order(g);
    self_edges::insert_self_edges(g);

    coordinate_system::adjust(g);
    position::position(g);
    check::check_positions(g)?;
    self_edges::position_self_edges(g);
    normalize::undo(g);
    route::fixup_edge_label_coords(g);
    coordinate_system::undo(g);

    route::assign_node_intersects(g);
    route::assign_label_anchors(g);
    acyclic::undo(g);
    translate(g);

    tracing::debug!(
        width = g.graph().width,
        height = g.graph().height,
        "layout: done"
    );
    Ok(())
}

fn translate(g: &mut LayoutGraph) {
    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();
    for v in g.nodes() {
        let Some(n) = g.node(v) else {
            continue;
        };
        let (Some(x), Some(y)) = (n.x, n.y) else {
            continue;
        };
        xs.extend([x - n.width / 2.0, x + n.width / 2.0]);
        ys.extend([y - n.height / 2.0, y + n.height / 2.0]);
    }
    for e in g.edges() {
        let Some(label) = g.edge_by_key(e) else {
            continue;
        };
        for p in &label.points {
            xs.push(p.x);
            ys.push(p.y);
        }
        if let (Some(x), Some(y)) = (label.x, label.y) {
            xs.extend([x - label.width / 2.0, x + label.width / 2.0]);
            ys.extend([y - label.height / 2.0, y + label.height / 2.0]);
        }
    }

    let margin_x = g.graph().marginx;
    let margin_y = g.graph().marginy;
    let (min_x, max_x) = min_max(xs).unwrap_or((0.0, 0.0));
    let (min_y, max_y) = min_max(ys).unwrap_or((0.0, 0.0));
    let dx = margin_x - min_x;
    let dy = margin_y - min_y;

    g.for_each_node_mut(|_, n| {
        if let Some(x) = n.x.as_mut() {
            *x += dx;
        }
        if let Some(y) = n.y.as_mut() {
            *y += dy;
        }
    });
    g.for_each_edge_mut(|_, e| {
        for p in &mut e.points {
            p.x += dx;
            p.y += dy;
        }
        if let Some(x) = e.x.as_mut() {
            *x += dx;
        }
        if let Some(y) = e.y.as_mut() {
            *y += dy;
        }
    });

    let graph = g.graph_mut();
    graph.width = max_x - min_x + 2.0 * margin_x;
    graph.height = max_y - min_y + 2.0 * margin_y;
}
