use super::*;
use crate::error::invalid;
use crate::*;
use algograph::graph::{QueryableGraph, VertexId};
use std::collections::{BTreeMap, HashMap};

/// Fixed-point PageRank.
///
/// Starts from the uniform vector and applies the damped recurrence until no
/// vertex moves by `tolerance` or more. Contributions are accumulated in
/// vertex order, so equal inputs give bit-identical ranks.
pub struct IteratedPageRank<'a, G>
where
    G: QueryableGraph,
{
    model: TransitionModel<'a, G>,
    tolerance: f64,
    max_iterations: usize,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
    dangling: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 0.001,
            max_iterations: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub delta: HashMap<VertexId, f64, ahash::RandomState>,
    pub iterations: usize,
    pub converged: bool,
}

impl<'a, G: QueryableGraph> IteratedPageRank<'a, G> {
    pub fn new(g: &'a G, config: &Config) -> crate::Result<Self> {
        let damping = config.damping;
        if !(0.0..1.0).contains(&damping) {
            return invalid(format!("damping={damping} is outside [0, 1)"));
        }
        let tolerance = config.tolerance;
        if !(tolerance > 0.0) {
            return invalid(format!("tolerance={tolerance} is not positive"));
        }
        if config.max_iterations == 0 {
            return invalid("max_iterations=0");
        }
        let model = TransitionModel::new(g, damping)?;
        let mut transitions = BTreeMap::new();
        let mut dangling = vec![];
        for u in g.iter_vertices() {
            if model.is_dangling(&u) {
                dangling.push(u);
                continue;
            }
            let unit = damping / (model.out_degree(&u) as f64);
            for v in model.links(&u).iter() {
                transitions.insert((u, *v), unit);
            }
        }
        Ok(Self {
            model,
            tolerance,
            max_iterations: config.max_iterations,
            transitions,
            dangling,
        })
    }

    pub fn calc(&self) -> self::Result {
        let graph = self.model.graph();
        let damping = self.model.damping();
        let n = graph.vertex_size() as f64;
        let teleport = (1.0 - damping) / n;

        let mut p = uniform(graph);
        let mut r = HashMap::with_hasher(ahash::RandomState::new());
        let mut delta = HashMap::with_hasher(ahash::RandomState::new());
        let mut iterations = 0;
        while iterations < self.max_iterations {
            iterations += 1;

            // a dangling vertex spreads its rank evenly over the whole graph
            let spread: f64 = self.dangling.iter().map(|v| p[v]).sum::<f64>() * damping / n;
            for v in graph.iter_vertices() {
                r.insert(v, teleport + spread);
            }
            for ((v0, v1), w) in self.transitions.iter() {
                let from = p[v0];
                if let Some(to) = r.get_mut(v1) {
                    *to += from * w;
                }
            }

            delta.clear();
            for v in graph.iter_vertices() {
                delta.insert(v, r[&v] - p[&v]);
            }

            if max_abs_delta(&delta) < self.tolerance {
                normalize(graph, &mut r);
                tracing::debug!(iterations, "iterated page rank converged");
                return self::Result {
                    page_rank: r,
                    delta,
                    iterations,
                    converged: true,
                };
            }

            std::mem::swap(&mut p, &mut r);
            r.clear();
        }

        tracing::warn!(
            iterations,
            residual = max_abs_delta(&delta),
            "iterated page rank hit the iteration cap"
        );
        normalize(graph, &mut p);
        self::Result {
            page_rank: p,
            delta,
            iterations,
            converged: false,
        }
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState> {
        &self.page_rank
    }

    fn debug<'a, G: QueryableGraph>(&'a self, graph: &'a G) -> impl std::fmt::Debug + 'a {
        ResultDebug {
            graph,
            result: self,
        }
    }
}

pub struct ResultDebug<'a, G: QueryableGraph> {
    graph: &'a G,
    result: &'a self::Result,
}

impl<G: QueryableGraph> std::fmt::Debug for ResultDebug<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.iter_vertices() {
            let p = self.result.page_rank.get(&v).copied().unwrap_or(0.0);
            let d = self.result.delta.get(&v).copied().unwrap_or(0.0);
            writeln!(f, "{v:?}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}
