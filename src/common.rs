use algograph::graph::*;
use std::collections::HashMap;

/// Sum of `p` over the vertices of `graph`, taken in vertex order so that
/// the result does not depend on hash iteration order.
pub fn total<G: QueryableGraph>(graph: &G, p: &HashMap<VertexId, f64, ahash::RandomState>) -> f64 {
    graph
        .iter_vertices()
        .map(|v| p.get(&v).copied().unwrap_or(0.0))
        .sum()
}

pub fn uniform<G: QueryableGraph>(graph: &G) -> HashMap<VertexId, f64, ahash::RandomState> {
    let n = graph.vertex_size() as f64;
    graph.iter_vertices().map(|v| (v, 1.0 / n)).collect()
}

/// Rescales `p` in place so that it sums to 1. A zero vector is left alone.
pub fn normalize<G: QueryableGraph>(graph: &G, p: &mut HashMap<VertexId, f64, ahash::RandomState>) {
    let sum = total(graph, p);
    if sum > 0.0 {
        for w in p.values_mut() {
            *w /= sum;
        }
    }
}

/// Largest absolute value in `delta`.
pub fn max_abs_delta(delta: &HashMap<VertexId, f64, ahash::RandomState>) -> f64 {
    delta.values().fold(0.0, |acc, x| acc.max(x.abs()))
}
