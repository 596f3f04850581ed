use super::*;
use crate::error::invalid;
use algograph::graph::{QueryableGraph, VertexId};
use std::collections::HashMap;

/// Monte-Carlo PageRank: a random surfer takes `samples` steps and the
/// visit frequencies become the estimate.
pub struct SampledPageRank<'a, G>
where
    G: QueryableGraph,
{
    model: TransitionModel<'a, G>,
    samples: usize,
    vertices: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    /// Visits per vertex, the starting vertex included.
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
}

impl<'a, G: QueryableGraph> SampledPageRank<'a, G> {
    pub fn new(g: &'a G, config: &Config) -> crate::Result<Self> {
        if config.samples == 0 {
            return invalid("samples=0, at least one step is needed");
        }
        let model = TransitionModel::new(g, config.damping)?;
        Ok(Self {
            model,
            samples: config.samples,
            vertices: g.iter_vertices().collect(),
        })
    }

    pub fn calc<R>(&self, rng: &mut R) -> crate::Result<self::Result>
    where
        R: RandomSource + ?Sized,
    {
        let mut visits: HashMap<VertexId, usize, ahash::RandomState> =
            self.vertices.iter().map(|v| (*v, 0)).collect();

        let mut cur = self.vertices[rng.next_index(self.vertices.len())];
        *visits.entry(cur).or_insert(0) += 1;
        for _ in 0..self.samples {
            let dist = self.model.distribution(&cur)?;
            cur = match choose_weighted(&dist, rng.next_unit()) {
                Some(v) => v,
                None => return invalid(format!("no way out of vertex {cur:?}")),
            };
            *visits.entry(cur).or_insert(0) += 1;
        }
        tracing::debug!(samples = self.samples, "sampled page rank finished");

        let total = (self.samples + 1) as f64;
        let page_rank = self
            .vertices
            .iter()
            .map(|v| (*v, visits[v] as f64 / total))
            .collect();
        Ok(self::Result { page_rank, visits })
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
            let n = self.result.visits.get(&v).copied().unwrap_or(0);
            writeln!(f, "{v:?}: {p:?}, {n}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_rank::iterated;
    use crate::{LinkGraph, RankError};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::VecDeque;

    /// Replays fixed draws.
    struct Scripted {
        indices: VecDeque<usize>,
        units: VecDeque<f64>,
    }

    impl RandomSource for Scripted {
        fn next_unit(&mut self) -> f64 {
            self.units.pop_front().unwrap()
        }

        fn next_index(&mut self, n: usize) -> usize {
            let i = self.indices.pop_front().unwrap();
            assert!(i < n, "{i} >= {n}");
            i
        }
    }

    fn run<R>(g: &LinkGraph, damping: f64, samples: usize, rng: &mut R) -> Result
    where
        R: RandomSource + ?Sized,
    {
        let cfg = Config { damping, samples };
        SampledPageRank::new(g.graph(), &cfg)
            .unwrap()
            .calc(rng)
            .unwrap()
    }

    fn complete_three() -> LinkGraph {
        LinkGraph::from_links([
            ("a", vec!["b", "c"]),
            ("b", vec!["a", "c"]),
            ("c", vec!["a", "b"]),
        ])
    }

    #[test]
    fn scripted_walk() {
        let g = LinkGraph::from_links([
            ("1.html", vec!["2.html", "3.html"]),
            ("2.html", vec!["3.html"]),
            ("3.html", vec!["2.html"]),
        ]);
        // from 1.html: [1/6, 5/12, 5/12]; from 2.html: [1/6, 1/6, 2/3]
        let mut rng = Scripted {
            indices: [0].into_iter().collect(),
            units: [0.1, 0.5, 0.9].into_iter().collect(),
        };
        let res = run(&g, 0.5, 3, &mut rng);
        let est = g.estimate(&res.page_rank);
        assert_eq!(est["1.html"], 0.5);
        assert_eq!(est["2.html"], 0.25);
        assert_eq!(est["3.html"], 0.25);
        assert!(rng.units.is_empty());
    }

    #[test]
    fn complete_graph_is_uniform() {
        let g = complete_three();
        let mut rng = StdRng::seed_from_u64(3407);
        let res = run(&g, 0.85, 10_000, &mut rng);
        for (_, w) in g.estimate(&res.page_rank) {
            assert!((w - 1.0 / 3.0).abs() < 0.02, "{:?}", res.debug(g.graph()));
        }
    }

    #[test]
    fn sums_to_one() {
        let g = LinkGraph::from_links([("a", vec!["b"]), ("b", vec![]), ("c", vec!["a", "b"])]);
        let mut rng = StdRng::seed_from_u64(7);
        let res = run(&g, 0.85, 1_000, &mut rng);
        let total: usize = res.visits.values().sum();
        assert_eq!(total, 1_001);
        let sum: f64 = g.estimate(&res.page_rank).values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "{sum}");
    }

    #[test]
    fn seeded_runs_repeat() {
        let g = complete_three();
        let a = run(&g, 0.85, 500, &mut StdRng::seed_from_u64(11));
        let b = run(&g, 0.85, 500, &mut StdRng::seed_from_u64(11));
        assert_eq!(g.estimate(&a.page_rank), g.estimate(&b.page_rank));
    }

    #[test]
    fn agrees_with_iteration() {
        let g = LinkGraph::from_links([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html"]),
            ("4.html", vec!["2.html"]),
            ("5.html", vec![]),
        ]);
        let oracle = {
            let cfg = iterated::Config::default();
            let res = iterated::IteratedPageRank::new(g.graph(), &cfg)
                .unwrap()
                .calc();
            g.estimate(&res.page_rank)
        };
        const RUNS: u64 = 5;
        let mut mean: HashMap<String, f64> = HashMap::new();
        for seed in 0..RUNS {
            let mut rng = StdRng::seed_from_u64(seed);
            for (name, w) in g.estimate(&run(&g, 0.85, 10_000, &mut rng).page_rank) {
                *mean.entry(name).or_insert(0.0) += w / RUNS as f64;
            }
        }
        for (name, w) in oracle.iter() {
            let m = mean[name];
            assert!((m - w).abs() < 0.02, "{name}: sampled={m} iterated={w}");
        }
    }

    #[test]
    fn rejects_bad_input() {
        let g = complete_three();
        let cfg = Config {
            damping: 0.85,
            samples: 0,
        };
        assert!(matches!(
            SampledPageRank::new(g.graph(), &cfg),
            Err(RankError::InvalidInput(_))
        ));
        let empty = LinkGraph::new();
        assert!(matches!(
            SampledPageRank::new(empty.graph(), &Config::default()),
            Err(RankError::InvalidInput(_))
        ));
    }
}
