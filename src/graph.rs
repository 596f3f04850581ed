use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A directed hyperlink graph keyed by document id.
///
/// Vertices are added in id order, so iterating the backing graph visits
/// documents sorted by id. Self links, duplicate links and links to
/// documents outside the graph never make it into the edge set.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: directed::TreeBackedGraph,
    vertices: BTreeMap<String, VertexId>,
    names: HashMap<VertexId, String, ahash::RandomState>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self {
            graph: directed::TreeBackedGraph::new(),
            vertices: BTreeMap::new(),
            names: HashMap::with_hasher(ahash::RandomState::new()),
        }
    }

    pub fn from_links<I, K, L>(pages: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        L: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let pages: BTreeMap<String, BTreeSet<String>> = {
            let mut sorted: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
            for (page, links) in pages {
                sorted
                    .entry(page.into())
                    .or_default()
                    .extend(links.into_iter().map(Into::into));
            }
            sorted
        };

        let mut res = Self::new();
        for page in pages.keys() {
            let v = res.graph.add_vertex();
            res.vertices.insert(page.clone(), v);
            res.names.insert(v, page.clone());
        }
        for (page, links) in pages.iter() {
            let u = res.vertices[page];
            for link in links.iter() {
                if link == page {
                    continue;
                }
                if let Some(v) = res.vertices.get(link) {
                    res.graph.add_edge(u, *v);
                }
            }
        }
        res
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn graph(&self) -> &directed::TreeBackedGraph {
        &self.graph
    }

    pub fn vertex(&self, name: &str) -> Option<VertexId> {
        self.vertices.get(name).copied()
    }

    pub fn name(&self, v: &VertexId) -> Option<&str> {
        self.names.get(v).map(String::as_str)
    }

    /// Document ids in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices.keys().map(String::as_str)
    }

    pub fn links(&self, name: &str) -> Option<BTreeSet<&str>> {
        let u = self.vertex(name)?;
        let links = self
            .graph
            .out_edges(&u)
            .filter_map(|e| self.name(&e.sink))
            .collect();
        Some(links)
    }

    /// Re-keys a vertex-indexed estimate by document id.
    pub fn estimate(
        &self,
        p: &HashMap<VertexId, f64, ahash::RandomState>,
    ) -> BTreeMap<String, f64> {
        self.vertices
            .iter()
            .map(|(name, v)| (name.clone(), p.get(v).copied().unwrap_or(0.0)))
            .collect()
    }
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self::new()
    }
}
