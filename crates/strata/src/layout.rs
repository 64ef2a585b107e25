//! Bridges the graph store and the layout engine.

use crate::attrs::{LabelPos, RankDir};
use crate::error::Result;
use crate::graph::DirectedGraph;
use crate::positioned::{
    Bounds, Point, PositionedEdge, PositionedGraph, PositionedLabel, PositionedVertex,
};
use crate::sizing::{DeterministicSizer, Size, SizeProvider};
use std::collections::BTreeSet;
use strata_layout::graphlib::GraphOptions;
use strata_layout::{EdgeLabel, GraphLabel, LayoutGraph, NodeLabel};

impl DirectedGraph {
    /// Lays the graph out with the [`DeterministicSizer`].
    pub fn layout(&self) -> PositionedGraph {
        self.layout_with(&DeterministicSizer::default())
    }

    /// Like [`Self::layout`], but reports internal invariant violations instead of logging them.
    pub fn try_layout(&self) -> Result<PositionedGraph> {
        self.try_layout_with(&DeterministicSizer::default())
    }

    /// Lays the graph out, measuring unsized elements with `sizer`.
    ///
    /// Layout is total over valid graphs. An internal invariant violation is logged at `error`
    /// level, panics in debug builds, and yields an empty drawing in release builds.
    pub fn layout_with(&self, sizer: &dyn SizeProvider) -> PositionedGraph {
        match self.try_layout_with(sizer) {
            Ok(positioned) => positioned,
            Err(err) => {
                tracing::error!(error = %err, "layout failed");
                if cfg!(debug_assertions) {
                    panic!("layout failed: {err}");
                }
                PositionedGraph::empty(
                    self.attrs.layout.rank_dir,
                    self.attrs.render.bg_color.clone(),
                )
            }
        }
    }

    pub fn try_layout_with(&self, sizer: &dyn SizeProvider) -> Result<PositionedGraph> {
        let mut g = self.to_layout_graph(sizer);
        strata_layout::layout(&mut g)?;
        Ok(self.collect_positions(&g))
    }

    fn to_layout_graph(&self, sizer: &dyn SizeProvider) -> LayoutGraph {
        let layout = &self.attrs.layout;
        let mut g = LayoutGraph::new(GraphOptions { multigraph: true });
        g.set_graph(GraphLabel {
            rankdir: match layout.rank_dir {
                RankDir::TB => strata_layout::RankDir::TB,
                RankDir::BT => strata_layout::RankDir::BT,
                RankDir::LR => strata_layout::RankDir::LR,
                RankDir::RL => strata_layout::RankDir::RL,
            },
            nodesep: layout.node_sep,
            ranksep: layout.rank_sep,
            edgesep: layout.edge_sep,
            marginx: layout.margin_x,
            marginy: layout.margin_y,
            ..Default::default()
        });

        for v in &self.vertices {
            let explicit = (v.attrs.layout.shape_w, v.attrs.layout.shape_h);
            let measured = match explicit {
                (Some(_), Some(_)) => Size::default(),
                _ if v.options.compute_bounding_box => sizer.vertex_size(&v.id, &v.attrs),
                _ => Size::default(),
            };
            g.set_node(
                v.id.clone(),
                NodeLabel::sized(
                    explicit.0.unwrap_or(measured.width),
                    explicit.1.unwrap_or(measured.height),
                ),
            );
        }

        for e in &self.edges {
            let explicit = (e.attrs.layout.shape_w, e.attrs.layout.shape_h);
            let measured = match explicit {
                (Some(_), Some(_)) => Size::default(),
                _ if e.options.compute_bounding_box => sizer.edge_label_size(&e.attrs),
                _ => Size::default(),
            };
            let label = EdgeLabel {
                width: explicit.0.unwrap_or(measured.width),
                height: explicit.1.unwrap_or(measured.height),
                labelpos: match e.attrs.layout.label_pos {
                    LabelPos::L => strata_layout::LabelPos::L,
                    LabelPos::R => strata_layout::LabelPos::R,
                    LabelPos::C => strata_layout::LabelPos::C,
                },
                ..Default::default()
            };
            g.set_edge_named(
                self.vertices[e.source].id.clone(),
                self.vertices[e.target].id.clone(),
                Some(e.id.clone()),
                Some(label),
            );
        }

        tracing::debug!(
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            "layout graph built"
        );
        g
    }

    fn collect_positions(&self, g: &LayoutGraph) -> PositionedGraph {
        let ranks: BTreeSet<i32> = self
            .vertices
            .iter()
            .filter_map(|v| g.node(&v.id).and_then(|n| n.rank))
            .collect();
        let dense_rank =
            |rank: Option<i32>| rank.and_then(|r| ranks.iter().position(|&x| x == r)).unwrap_or(0);

        let vertices: Vec<PositionedVertex> = self
            .vertices
            .iter()
            .map(|v| {
                let n = g.node(&v.id).cloned().unwrap_or_default();
                PositionedVertex {
                    id: v.id.clone(),
                    x: n.x.unwrap_or(0.0),
                    y: n.y.unwrap_or(0.0),
                    width: n.width,
                    height: n.height,
                    rank: dense_rank(n.rank),
                    render: v.attrs.render.clone(),
                }
            })
            .collect();

        let edges: Vec<PositionedEdge> = self
            .edges
            .iter()
            .map(|e| {
                let source = &self.vertices[e.source].id;
                let target = &self.vertices[e.target].id;
                let label = g
                    .edge(source, target, Some(e.id.as_str()))
                    .cloned()
                    .unwrap_or_default();
                let points: Vec<Point> = label
                    .points
                    .iter()
                    .map(|p| Point { x: p.x, y: p.y })
                    .collect();
                let anchor = match (label.x, label.y) {
                    (Some(x), Some(y)) => Point { x, y },
                    _ => points.first().copied().unwrap_or(Point { x: 0.0, y: 0.0 }),
                };
                PositionedEdge {
                    id: e.id.clone(),
                    source: source.clone(),
                    target: target.clone(),
                    points,
                    label: PositionedLabel {
                        x: anchor.x,
                        y: anchor.y,
                        width: label.width,
                        height: label.height,
                    },
                    feedback: label.feedback,
                    render: e.attrs.render.clone(),
                }
            })
            .collect();

        let corners = vertices
            .iter()
            .flat_map(|v| {
                [
                    (v.x - v.width / 2.0, v.y - v.height / 2.0),
                    (v.x + v.width / 2.0, v.y + v.height / 2.0),
                ]
            })
            .chain(edges.iter().flat_map(|e| {
                let l = e.label;
                e.points.iter().map(|p| (p.x, p.y)).chain([
                    (l.x - l.width / 2.0, l.y - l.height / 2.0),
                    (l.x + l.width / 2.0, l.y + l.height / 2.0),
                ])
            }));
        let bounds = Bounds::from_points(corners).unwrap_or(Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        });

        let graph = g.graph();
        PositionedGraph::new(
            graph.width,
            graph.height,
            bounds,
            self.attrs.layout.rank_dir,
            self.attrs.render.bg_color.clone(),
            vertices,
            edges,
        )
    }
}
