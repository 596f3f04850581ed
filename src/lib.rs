mod common;
pub use self::common::*;
pub mod corpus;
pub use self::corpus::crawl;
pub mod error;
pub use self::error::{RankError, Result};
pub mod graph;
pub use self::graph::LinkGraph;

pub mod page_rank;
pub use self::page_rank::{
    iterate_pagerank, iterate_pagerank_with, sample_pagerank, transition, Distribution,
    RandomSource, RankEstimate,
};
pub mod report;
