use crate::error::*;
use algograph::graph::*;
use std::collections::{BTreeSet, HashMap};

/// The damped random-surfer step over a graph.
///
/// A vertex without outbound links is treated as linking to every vertex,
/// itself included. Both estimators read out-degrees and targets from here,
/// so the sampled walk and the iterated recurrence share one chain.
pub struct TransitionModel<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    damping: f64,
    links: HashMap<VertexId, Vec<VertexId>, ahash::RandomState>,
}

impl<'a, G: QueryableGraph> TransitionModel<'a, G> {
    pub fn new(g: &'a G, damping: f64) -> Result<Self> {
        if g.vertex_size() == 0 {
            return invalid("graph has no vertices");
        }
        if !(0.0..=1.0).contains(&damping) {
            return invalid(format!("damping={damping} is outside [0, 1]"));
        }
        let links: HashMap<VertexId, Vec<VertexId>, ahash::RandomState> = g
            .iter_vertices()
            .map(|u| {
                let sinks: BTreeSet<VertexId> = g
                    .out_edges(&u)
                    .map(|e| e.sink)
                    .filter(|v| *v != u)
                    .collect();
                (u, sinks.into_iter().collect())
            })
            .collect();
        Ok(Self {
            graph: g,
            damping,
            links,
        })
    }

    pub fn graph(&self) -> &'a G {
        self.graph
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn is_dangling(&self, u: &VertexId) -> bool {
        self.links.get(u).is_some_and(|xs| xs.is_empty())
    }

    /// Outbound links of `u`, empty for a dangling vertex.
    pub fn links(&self, u: &VertexId) -> &[VertexId] {
        self.links.get(u).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Out-degree of `u` once dangling vertices link everywhere.
    pub fn out_degree(&self, u: &VertexId) -> usize {
        if self.is_dangling(u) {
            self.graph.vertex_size()
        } else {
            self.links(u).len()
        }
    }

    /// Probability of stepping to each vertex from `u`, in vertex order.
    pub fn distribution(&self, u: &VertexId) -> Result<Vec<(VertexId, f64)>> {
        if !self.links.contains_key(u) {
            return invalid(format!("vertex {u:?} is not in the graph"));
        }
        let n = self.graph.vertex_size() as f64;
        let base = (1.0 - self.damping) / n;
        let share = self.damping / self.out_degree(u) as f64;
        let res = if self.is_dangling(u) {
            self.graph
                .iter_vertices()
                .map(|v| (v, base + share))
                .collect()
        } else {
            let links = self.links(u);
            self.graph
                .iter_vertices()
                .map(|v| {
                    // `links` is sorted
                    if links.binary_search(&v).is_ok() {
                        (v, base + share)
                    } else {
                        (v, base)
                    }
                })
                .collect()
        };
        Ok(res)
    }
}

/// Picks a key by inverting the cumulative distribution at `u`, a uniform
/// draw from `[0, 1)`.
///
/// Weights need not be normalized. Keys are walked in slice order and
/// zero-weight keys are never picked. Returns `None` when no weight is
/// positive.
pub fn choose_weighted<K: Copy>(dist: &[(K, f64)], u: f64) -> Option<K> {
    let total: f64 = dist.iter().map(|(_, w)| w.max(0.0)).sum();
    if total <= 0.0 || total.is_nan() {
        return None;
    }
    let target = u * total;
    let mut acc = 0.0;
    let mut last = None;
    for (k, w) in dist.iter() {
        if *w <= 0.0 {
            continue;
        }
        acc += w;
        last = Some(*k);
        if target < acc {
            return last;
        }
    }
    // rounding left `acc` a hair below `target`
    last
}
