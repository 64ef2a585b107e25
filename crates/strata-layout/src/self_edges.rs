//! Self-loop handling.
//!
//! Self-loops are detached before ranking and stashed on their vertex. After ordering, each one
//! gets a placeholder vertex right after its owner in the same layer, so positioning reserves
//! room for the loop; the placeholder is then turned into the loop's control points.

use crate::util::{build_layer_matrix, fresh_node_id};
use crate::{Dummy, LabelPos, LayoutGraph, NodeLabel, Point, SelfEdge};

pub fn remove_self_edges(g: &mut LayoutGraph) {
    for e in g.edge_keys() {
        if !e.is_self_loop() {
            continue;
        }
        let Some(label) = g.take_edge(&e) else {
            continue;
        };
        if let Some(n) = g.node_mut(&e.v) {
            n.self_edges.push(SelfEdge { edge_obj: e, label });
        }
    }
}

pub fn insert_self_edges(g: &mut LayoutGraph) {
    let horizontal = g.graph().rankdir.is_horizontal();
    for layer in build_layer_matrix(g) {
        let mut extra: usize = 0;
        for (idx, node_id) in layer.iter().enumerate() {
            let Some(node) = g.node_mut(node_id) else {
                continue;
            };
            node.order = Some(idx + extra);
            let Some(rank) = node.rank else {
                continue;
            };
            let self_edges = std::mem::take(&mut node.self_edges);

            for se in self_edges {
                extra += 1;
                let id = fresh_node_id(g, "_s");
                // L/R labels already carry the offset from `make_space_for_edge_labels`; runs
                // before `coordinate_system::adjust`, so the order axis is `height` for LR/RL.
                let gap = if se.label.has_label_box() && se.label.labelpos == LabelPos::C {
                    se.label.labeloffset
                } else {
                    0.0
                };
                let (width, height) = if horizontal {
                    (se.label.width, se.label.height + gap)
                } else {
                    (se.label.width + gap, se.label.height)
                };
                g.set_node(
                    id,
                    NodeLabel {
                        width,
                        height,
                        rank: Some(rank),
                        order: Some(idx + extra),
                        dummy: Some(Dummy::SelfEdge),
                        edge_label: Some(se.label),
                        edge_obj: Some(se.edge_obj),
                        ..Default::default()
                    },
                );
            }
        }
    }
}

/// Replaces each self-loop placeholder with a five-point loop on the right side of its vertex.
///
/// A labeled loop reaches only to the placeholder's near edge; the label box fills the rest of
/// the placeholder, `labeloffset` beyond the loop, whatever its `labelpos`.
pub fn position_self_edges(g: &mut LayoutGraph) {
    for id in g.node_ids() {
        let Some(node) = g.node(&id) else {
            continue;
        };
        if node.dummy != Some(Dummy::SelfEdge) {
            continue;
        }
        let (Some(x), Some(y)) = (node.x, node.y) else {
            continue;
        };
        let (Some(edge_obj), Some(mut label)) = (node.edge_obj.clone(), node.edge_label.clone())
        else {
            continue;
        };
        let Some(owner) = g.node(&edge_obj.v) else {
            continue;
        };
        let (Some(vx), Some(vy)) = (owner.x, owner.y) else {
            continue;
        };

        let right = vx + owner.width / 2.0;
        let half_h = owner.height / 2.0;
        let (apex, label_x) = if label.has_label_box() {
            if label.labelpos != LabelPos::C {
                label.width -= label.labeloffset;
            }
            let near = x - node.width / 2.0;
            let far = x + node.width / 2.0;
            (near, far - label.width / 2.0)
        } else {
            (x, x)
        };
        let reach = apex - right;

        label.points = vec![
            Point {
                x: right + 2.0 * reach / 3.0,
                y: vy - half_h,
            },
            Point {
                x: right + 5.0 * reach / 6.0,
                y: vy - half_h,
            },
            Point {
                x: right + reach,
                y: vy,
            },
            Point {
                x: right + 5.0 * reach / 6.0,
                y: vy + half_h,
            },
            Point {
                x: right + 2.0 * reach / 3.0,
                y: vy + half_h,
            },
        ];
        label.x = Some(label_x);
        label.y = Some(y);
        label.self_loop = true;

        g.remove_node(&id);
        g.set_edge_key(edge_obj, label);
    }
}
