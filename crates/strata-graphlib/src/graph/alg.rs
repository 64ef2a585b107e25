//! Small graph algorithms shared by the layout passes and their tests.

use super::Graph;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError {
    /// Nodes that could not be ordered because they sit on (or behind) a cycle.
    pub remaining: Vec<String>,
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "graph has a cycle through {} node(s)", self.remaining.len())
    }
}

impl std::error::Error for CycleError {}

/// Kahn's algorithm. Ready nodes are released in insertion order, so the result is stable.
pub fn topsort<N, E, G>(g: &Graph<N, E, G>) -> Result<Vec<String>, CycleError>
where
    N: Default,
    E: Default,
    G: Default,
{
    let mut indegree: BTreeMap<usize, usize> = BTreeMap::new();
    for v in g.nodes() {
        let ix = g.node_ix(v).unwrap_or(usize::MAX);
        indegree.insert(ix, g.in_edges(v, None).len());
    }

    let ids = g.node_ids();
    let mut ready: BTreeSet<usize> = indegree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(ix, _)| *ix)
        .collect();
    let mut out: Vec<String> = Vec::with_capacity(ids.len());

    while let Some(ix) = ready.pop_first() {
        let v = &ids[ix];
        out.push(v.clone());
        for w in g.successors(v) {
            let Some(w_ix) = g.node_ix(w) else {
                continue;
            };
            if let Some(d) = indegree.get_mut(&w_ix) {
                *d = d.saturating_sub(1);
                if *d == 0 {
                    ready.insert(w_ix);
                }
            }
        }
    }

    if out.len() != ids.len() {
        let done: BTreeSet<&str> = out.iter().map(|s| s.as_str()).collect();
        let remaining = ids
            .iter()
            .filter(|v| !done.contains(v.as_str()))
            .cloned()
            .collect();
        return Err(CycleError { remaining });
    }
    Ok(out)
}

/// Strongly connected components of size > 1, plus single nodes with a self-loop.
///
/// Each cycle lists its nodes in insertion order; cycles are sorted by their first node.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default,
    E: Default,
    G: Default,
{
    struct Tarjan<'a, N, E, G>
    where
        N: Default,
        E: Default,
        G: Default,
    {
        g: &'a Graph<N, E, G>,
        index: usize,
        stack: Vec<String>,
        on_stack: BTreeSet<String>,
        indices: BTreeMap<String, usize>,
        lowlink: BTreeMap<String, usize>,
        sccs: Vec<Vec<String>>,
    }

    impl<N, E, G> Tarjan<'_, N, E, G>
    where
        N: Default,
        E: Default,
        G: Default,
    {
        fn low(&self, v: &str) -> usize {
            self.lowlink.get(v).copied().unwrap_or(usize::MAX)
        }

        fn strongconnect(&mut self, v: &str) {
            self.indices.insert(v.to_string(), self.index);
            self.lowlink.insert(v.to_string(), self.index);
            self.index += 1;
            self.stack.push(v.to_string());
            self.on_stack.insert(v.to_string());

            for w in self.g.successors(v) {
                if !self.indices.contains_key(w) {
                    self.strongconnect(w);
                    let low = self.low(v).min(self.low(w));
                    self.lowlink.insert(v.to_string(), low);
                } else if self.on_stack.contains(w) {
                    let w_ix = self.indices.get(w).copied().unwrap_or(usize::MAX);
                    let low = self.low(v).min(w_ix);
                    self.lowlink.insert(v.to_string(), low);
                }
            }

            if self.indices.get(v).copied() != Some(self.low(v)) {
                return;
            }
            let mut scc: Vec<String> = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack.remove(&w);
                let done = w == v;
                scc.push(w);
                if done {
                    break;
                }
            }
            self.sccs.push(scc);
        }
    }

    let mut tarjan = Tarjan {
        g,
        index: 0,
        stack: Vec::new(),
        on_stack: BTreeSet::new(),
        indices: BTreeMap::new(),
        lowlink: BTreeMap::new(),
        sccs: Vec::new(),
    };
    for v in g.nodes() {
        if !tarjan.indices.contains_key(v) {
            tarjan.strongconnect(v);
        }
    }

    let mut cycles: Vec<Vec<String>> = Vec::new();
    for mut scc in tarjan.sccs {
        if scc.len() > 1 {
            scc.sort_by_key(|v| g.node_ix(v).unwrap_or(usize::MAX));
            cycles.push(scc);
        } else if let Some(v) = scc.first() {
            if !g.out_edges(v, Some(v)).is_empty() {
                cycles.push(scc);
            }
        }
    }
    cycles.sort_by(|a, b| a.first().cmp(&b.first()));
    cycles
}
