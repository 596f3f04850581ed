use algograph::graph::*;
use std::collections::HashMap;

pub trait PageRankResult {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState>;
    fn debug<'a, G: QueryableGraph>(&'a self, graph: &'a G) -> impl std::fmt::Debug + 'a;
}

/// Source of the uniform draws behind the random surfer.
///
/// Every `rand::Rng` is a source; tests may script the draws instead.
pub trait RandomSource {
    /// A uniform draw from `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// A uniform index in `0..n`. `n` is positive.
    fn next_index(&mut self, n: usize) -> usize;
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_index(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}
