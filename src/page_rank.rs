//! PageRank over a [`LinkGraph`].
//!
//! Two estimators share one [`TransitionModel`]: [`sampled`] walks a random
//! surfer through the graph and counts visits, [`iterated`] solves the
//! damped recurrence to a fixed point. The free functions below take and
//! return document ids; the estimator types work on any `QueryableGraph`.

pub mod iterated;
pub mod sampled;
mod traits;
pub use self::traits::*;
mod transition;
pub use self::transition::*;

use crate::error::*;
use crate::LinkGraph;
use std::collections::BTreeMap;

/// Probability of stepping to each document next.
pub type Distribution = BTreeMap<String, f64>;

/// Estimated PageRank per document.
pub type RankEstimate = BTreeMap<String, f64>;

/// Where the surfer goes next from `node`.
pub fn transition(graph: &LinkGraph, node: &str, damping: f64) -> Result<Distribution> {
    let model = TransitionModel::new(graph.graph(), damping)?;
    let Some(u) = graph.vertex(node) else {
        return invalid(format!("{node} is not in the graph"));
    };
    let dist = model
        .distribution(&u)?
        .into_iter()
        .filter_map(|(v, w)| graph.name(&v).map(|name| (name.to_string(), w)))
        .collect();
    Ok(dist)
}

/// Estimates PageRank from `n` steps of a random surfer.
pub fn sample_pagerank<R>(
    graph: &LinkGraph,
    damping: f64,
    n: usize,
    rng: &mut R,
) -> Result<RankEstimate>
where
    R: RandomSource + ?Sized,
{
    let cfg = sampled::Config { damping, samples: n };
    let res = sampled::SampledPageRank::new(graph.graph(), &cfg)?.calc(rng)?;
    Ok(graph.estimate(res.page_rank()))
}

/// Estimates PageRank by iterating the recurrence to a tolerance of 0.001.
pub fn iterate_pagerank(graph: &LinkGraph, damping: f64) -> Result<RankEstimate> {
    let cfg = iterated::Config {
        damping,
        ..iterated::Config::default()
    };
    iterate_pagerank_with(graph, &cfg)
}

pub fn iterate_pagerank_with(graph: &LinkGraph, config: &iterated::Config) -> Result<RankEstimate> {
    let res = iterated::IteratedPageRank::new(graph.graph(), config)?.calc();
    Ok(graph.estimate(res.page_rank()))
}
