//! Structural diff between two graph versions.
//!
//! Vertices are matched by id; edges by (id, source id, target id), so an edge whose endpoint
//! was renamed counts as removed from the old graph and added to the new one. [`diff`] writes
//! the result into both graphs as colors; [`classify`] only reports it.

use crate::graph::DirectedGraph;
use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;

pub const REMOVED_COLOR: &str = "#e5484d";
pub const ADDED_COLOR: &str = "#30a46c";
pub const MODIFIED_COLOR: &str = "#f5a524";
pub const UNCHANGED_COLOR: &str = "#8b8d98";

/// Alpha suffix appended to the classification color for fills.
const FILL_ALPHA: &str = "1a";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Only in the new graph.
    Added,
    /// Only in the old graph.
    Removed,
    /// In both, with differing attributes.
    Modified,
    /// In both, with identical attributes.
    Unchanged,
}

impl Classification {
    pub fn color(self) -> &'static str {
        match self {
            Classification::Added => ADDED_COLOR,
            Classification::Removed => REMOVED_COLOR,
            Classification::Modified => MODIFIED_COLOR,
            Classification::Unchanged => UNCHANGED_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeIdentity {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Per-identity classifications: old-graph elements first in insertion order, then the
/// elements only found in the new graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffReport {
    pub vertices: IndexMap<String, Classification>,
    pub edges: IndexMap<EdgeIdentity, Classification>,
}

impl DiffReport {
    pub fn vertex(&self, id: &str) -> Option<Classification> {
        self.vertices.get(id).copied()
    }

    pub fn edge(&self, id: &str, source: &str, target: &str) -> Option<Classification> {
        self.edges
            .get(&EdgeIdentity {
                id: id.to_string(),
                source: source.to_string(),
                target: target.to_string(),
            })
            .copied()
    }

    pub fn vertex_count(&self, class: Classification) -> usize {
        self.vertices.values().filter(|&&c| c == class).count()
    }

    pub fn edge_count(&self, class: Classification) -> usize {
        self.edges.values().filter(|&&c| c == class).count()
    }
}

fn edge_identities(g: &DirectedGraph) -> Vec<EdgeIdentity> {
    g.edges
        .iter()
        .map(|e| EdgeIdentity {
            id: e.id.clone(),
            source: g.vertices[e.source].id.clone(),
            target: g.vertices[e.target].id.clone(),
        })
        .collect()
}

/// Classifies every vertex and edge of `old` and `new` without touching either graph.
pub fn classify(old: &DirectedGraph, new: &DirectedGraph) -> DiffReport {
    let mut report = DiffReport::default();

    let new_vertices: HashMap<&str, usize> = new
        .vertices
        .iter()
        .enumerate()
        .map(|(ix, v)| (v.id.as_str(), ix))
        .collect();
    for v in &old.vertices {
        let class = match new_vertices.get(v.id.as_str()) {
            None => Classification::Removed,
            Some(&ix) if new.vertices[ix].attrs == v.attrs => Classification::Unchanged,
            Some(_) => Classification::Modified,
        };
        report.vertices.insert(v.id.clone(), class);
    }
    for v in &new.vertices {
        if !report.vertices.contains_key(&v.id) {
            report.vertices.insert(v.id.clone(), Classification::Added);
        }
    }

    let new_ids = edge_identities(new);
    let new_edges: HashMap<&EdgeIdentity, usize> =
        new_ids.iter().enumerate().map(|(ix, k)| (k, ix)).collect();
    for (key, e) in edge_identities(old).into_iter().zip(&old.edges) {
        let class = match new_edges.get(&key) {
            None => Classification::Removed,
            Some(&ix) if new.edges[ix].attrs == e.attrs => Classification::Unchanged,
            Some(_) => Classification::Modified,
        };
        report.edges.insert(key, class);
    }
    for key in &new_ids {
        if !report.edges.contains_key(key) {
            report.edges.insert(key.clone(), Classification::Added);
        }
    }

    tracing::debug!(
        removed = report.vertex_count(Classification::Removed),
        added = report.vertex_count(Classification::Added),
        modified = report.vertex_count(Classification::Modified),
        "graph diff classified"
    );
    report
}

/// Color-codes both graphs by classification.
///
/// Removed elements are marked in `old`, added ones in `new`, modified and unchanged ones in
/// both. Stroke, font and fill colors are overwritten; the previous styling is not kept.
pub fn diff(old: &mut DirectedGraph, new: &mut DirectedGraph) {
    let report = classify(old, new);
    paint(old, &report);
    paint(new, &report);
}

fn paint(g: &mut DirectedGraph, report: &DiffReport) {
    for v in &mut g.vertices {
        let Some(class) = report.vertex(&v.id) else {
            continue;
        };
        let color = class.color();
        let render = &mut v.attrs.render;
        render.color = Some(color.to_string());
        render.font_color = Some(color.to_string());
        render.fill_color = Some(format!("{color}{FILL_ALPHA}"));
    }

    let keys = edge_identities(g);
    for (key, e) in keys.iter().zip(&mut g.edges) {
        let Some(&class) = report.edges.get(key) else {
            continue;
        };
        let color = class.color();
        let render = &mut e.attrs.render;
        render.color = Some(color.to_string());
        render.font_color = Some(color.to_string());
        render.fill_color = Some(format!("{color}{FILL_ALPHA}"));
    }
}
