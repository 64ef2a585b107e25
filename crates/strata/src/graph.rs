//! The graph store.
//!
//! Vertices and edges live in insertion-ordered arenas; callers hold small `Copy` handles
//! (arena index plus the owning graph's identity), so the store keeps exclusive mutation rights
//! and a handle from one graph is rejected by another.

use crate::attrs::{EdgeAttrs, GraphAttrs, VertexAttrs, merged};
use crate::error::{ElementKind, Error, Result};
use rustc_hash::FxHashMap as HashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexHandle {
    graph: u64,
    index: usize,
}

impl VertexHandle {
    /// Insertion index of the vertex within its graph.
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeHandle {
    graph: u64,
    index: usize,
}

impl EdgeHandle {
    /// Insertion index of the edge within its graph.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Per-vertex sizing switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexOptions {
    /// Measure the vertex with the size provider when `shape_w`/`shape_h` are absent.
    /// When `false`, absent sizes are zero.
    pub compute_bounding_box: bool,
}

impl Default for VertexOptions {
    fn default() -> Self {
        Self {
            compute_bounding_box: true,
        }
    }
}

/// Per-edge sizing switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeOptions {
    /// Measure the label box with the size provider when `shape_w`/`shape_h` are absent.
    /// When `false`, absent sizes are zero.
    pub compute_bounding_box: bool,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            compute_bounding_box: true,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct VertexEntry {
    pub(crate) id: String,
    pub(crate) attrs: VertexAttrs,
    pub(crate) options: VertexOptions,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeEntry {
    pub(crate) id: String,
    pub(crate) source: usize,
    pub(crate) target: usize,
    pub(crate) attrs: EdgeAttrs,
    pub(crate) options: EdgeOptions,
}

/// A directed graph of styled vertices and edges.
///
/// Identities are unique per element kind: taken from `render.id` when the caller sets one,
/// otherwise generated (`v0`, `v1`, ... and `e0`, `e1`, ...). Self-loops and parallel edges are
/// allowed.
#[derive(Debug)]
pub struct DirectedGraph {
    graph_id: u64,
    pub(crate) attrs: GraphAttrs,
    pub(crate) vertices: Vec<VertexEntry>,
    pub(crate) edges: Vec<EdgeEntry>,
    vertex_ids: HashMap<String, usize>,
    edge_ids: HashMap<String, usize>,
}

impl Default for DirectedGraph {
    fn default() -> Self {
        Self::new(GraphAttrs::default())
    }
}

impl Clone for DirectedGraph {
    /// The clone is a separate store: handles from the original do not apply to it.
    fn clone(&self) -> Self {
        Self {
            graph_id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            attrs: self.attrs.clone(),
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
            vertex_ids: self.vertex_ids.clone(),
            edge_ids: self.edge_ids.clone(),
        }
    }
}

impl DirectedGraph {
    pub fn new(attrs: GraphAttrs) -> Self {
        Self {
            graph_id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            attrs,
            vertices: Vec::new(),
            edges: Vec::new(),
            vertex_ids: HashMap::default(),
            edge_ids: HashMap::default(),
        }
    }

    pub fn attrs(&self) -> &GraphAttrs {
        &self.attrs
    }

    pub fn set_attrs(&mut self, attrs: GraphAttrs) {
        self.attrs = attrs;
    }

    pub fn new_vertex(&mut self, attrs: VertexAttrs) -> Result<VertexHandle> {
        self.new_vertex_with(attrs, VertexOptions::default())
    }

    pub fn new_vertex_with(
        &mut self,
        mut attrs: VertexAttrs,
        options: VertexOptions,
    ) -> Result<VertexHandle> {
        let index = self.vertices.len();
        let id = match attrs.render.id.as_deref() {
            Some(id) if self.vertex_ids.contains_key(id) => {
                return Err(Error::DuplicateId {
                    kind: ElementKind::Vertex,
                    id: id.to_string(),
                });
            }
            Some(id) => id.to_string(),
            None => fresh_id(&self.vertex_ids, 'v', index),
        };
        attrs.render.id = Some(id.clone());

        self.vertex_ids.insert(id.clone(), index);
        self.vertices.push(VertexEntry { id, attrs, options });
        Ok(VertexHandle {
            graph: self.graph_id,
            index,
        })
    }

    pub fn new_edge(
        &mut self,
        source: VertexHandle,
        target: VertexHandle,
        attrs: EdgeAttrs,
    ) -> Result<EdgeHandle> {
        self.new_edge_with(source, target, attrs, EdgeOptions::default())
    }

    pub fn new_edge_with(
        &mut self,
        source: VertexHandle,
        target: VertexHandle,
        mut attrs: EdgeAttrs,
        options: EdgeOptions,
    ) -> Result<EdgeHandle> {
        let source = self.vertex_index(source)?;
        let target = self.vertex_index(target)?;

        let index = self.edges.len();
        let id = match attrs.render.id.as_deref() {
            Some(id) if self.edge_ids.contains_key(id) => {
                return Err(Error::DuplicateId {
                    kind: ElementKind::Edge,
                    id: id.to_string(),
                });
            }
            Some(id) => id.to_string(),
            None => fresh_id(&self.edge_ids, 'e', index),
        };
        attrs.render.id = Some(id.clone());

        self.edge_ids.insert(id.clone(), index);
        self.edges.push(EdgeEntry {
            id,
            source,
            target,
            attrs,
            options,
        });
        Ok(EdgeHandle {
            graph: self.graph_id,
            index,
        })
    }

    pub fn vertex(&self, h: VertexHandle) -> Result<&VertexAttrs> {
        let ix = self.vertex_index(h)?;
        Ok(&self.vertices[ix].attrs)
    }

    pub fn edge(&self, h: EdgeHandle) -> Result<&EdgeAttrs> {
        let ix = self.edge_index(h)?;
        Ok(&self.edges[ix].attrs)
    }

    pub fn vertex_id(&self, h: VertexHandle) -> Result<&str> {
        let ix = self.vertex_index(h)?;
        Ok(&self.vertices[ix].id)
    }

    pub fn edge_id(&self, h: EdgeHandle) -> Result<&str> {
        let ix = self.edge_index(h)?;
        Ok(&self.edges[ix].id)
    }

    /// Source and target of an edge.
    pub fn endpoints(&self, h: EdgeHandle) -> Result<(VertexHandle, VertexHandle)> {
        let ix = self.edge_index(h)?;
        let e = &self.edges[ix];
        Ok((self.vertex_handle(e.source), self.vertex_handle(e.target)))
    }

    /// Replaces a vertex's attributes with `f(previous)`.
    ///
    /// The identity never changes: whatever `render.id` the new record carries is reset to the
    /// vertex's id.
    pub fn update_vertex<F>(&mut self, h: VertexHandle, f: F) -> Result<()>
    where
        F: FnOnce(&VertexAttrs) -> VertexAttrs,
    {
        let ix = self.vertex_index(h)?;
        let entry = &mut self.vertices[ix];
        let mut next = f(&entry.attrs);
        next.render.id = Some(entry.id.clone());
        entry.attrs = next;
        Ok(())
    }

    /// Replaces an edge's attributes with `f(previous)`; see [`Self::update_vertex`].
    pub fn update_edge<F>(&mut self, h: EdgeHandle, f: F) -> Result<()>
    where
        F: FnOnce(&EdgeAttrs) -> EdgeAttrs,
    {
        let ix = self.edge_index(h)?;
        let entry = &mut self.edges[ix];
        let mut next = f(&entry.attrs);
        next.render.id = Some(entry.id.clone());
        entry.attrs = next;
        Ok(())
    }

    /// Merges a partial JSON attribute object into a vertex (e.g. `{"render": {"color": "red"}}`).
    pub fn merge_vertex(&mut self, h: VertexHandle, patch: &Value) -> Result<()> {
        let ix = self.vertex_index(h)?;
        let next = merged(&self.vertices[ix].attrs, patch)?;
        self.update_vertex(h, |_| next)
    }

    /// Merges a partial JSON attribute object into an edge.
    pub fn merge_edge(&mut self, h: EdgeHandle, patch: &Value) -> Result<()> {
        let ix = self.edge_index(h)?;
        let next = merged(&self.edges[ix].attrs, patch)?;
        self.update_edge(h, |_| next)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertex handles in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        (0..self.vertices.len()).map(|ix| self.vertex_handle(ix))
    }

    /// Edge handles in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeHandle> + '_ {
        (0..self.edges.len()).map(|ix| EdgeHandle {
            graph: self.graph_id,
            index: ix,
        })
    }

    pub fn find_vertex(&self, id: &str) -> Option<VertexHandle> {
        self.vertex_ids.get(id).map(|&ix| self.vertex_handle(ix))
    }

    pub fn find_edge(&self, id: &str) -> Option<EdgeHandle> {
        self.edge_ids.get(id).map(|&ix| EdgeHandle {
            graph: self.graph_id,
            index: ix,
        })
    }

    fn vertex_handle(&self, index: usize) -> VertexHandle {
        VertexHandle {
            graph: self.graph_id,
            index,
        }
    }

    fn vertex_index(&self, h: VertexHandle) -> Result<usize> {
        if h.graph != self.graph_id || h.index >= self.vertices.len() {
            return Err(Error::InvalidReference {
                kind: ElementKind::Vertex,
                index: h.index,
            });
        }
        Ok(h.index)
    }

    fn edge_index(&self, h: EdgeHandle) -> Result<usize> {
        if h.graph != self.graph_id || h.index >= self.edges.len() {
            return Err(Error::InvalidReference {
                kind: ElementKind::Edge,
                index: h.index,
            });
        }
        Ok(h.index)
    }
}

/// `"{prefix}{n}"` for the first `n >= start` not yet taken.
fn fresh_id(taken: &HashMap<String, usize>, prefix: char, start: usize) -> String {
    let mut n = start;
    loop {
        let id = format!("{prefix}{n}");
        if !taken.contains_key(&id) {
            return id;
        }
        n += 1;
    }
}
