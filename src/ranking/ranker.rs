use std::sync::Arc;
use std::time::Instant;

use crate::config::SearchConfig;
use crate::ranking::matcher::{Matcher, PreparedQuery};
use crate::ranking::{RankedCandidate, Searchable};

/// Fuzzy ranker over a growable working set of shared records.
///
/// Every call to [`search`](Ranker::search) is evaluated from scratch and
/// returns an independent snapshot. Ties keep insertion order.
#[derive(Debug)]
pub struct Ranker<R> {
    config: SearchConfig,
    records: Vec<Arc<R>>,
}

impl<R> Clone for Ranker<R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            records: self.records.clone(),
        }
    }
}

impl<R: Searchable> Ranker<R> {
    /// Create a ranker over `records`, which keep their order.
    pub fn new<I>(config: SearchConfig, records: I) -> Self
    where
        I: IntoIterator<Item = Arc<R>>,
    {
        Self {
            config,
            records: records.into_iter().collect(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn records(&self) -> &[Arc<R>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record. Visible to later searches only.
    pub fn add_item(&mut self, record: Arc<R>) {
        self.records.push(record);
    }

    /// Matching records, best first.
    pub fn search(&self, query: &str) -> Vec<Arc<R>> {
        self.search_scored(query)
            .into_iter()
            .map(|candidate| candidate.record)
            .collect()
    }

    /// Matching records with their best field rating, best first.
    pub fn search_scored(&self, query: &str) -> Vec<RankedCandidate<R>> {
        let start = Instant::now();
        let prepared = PreparedQuery::new(query, &self.config);
        let ratings = self.rate_all(&prepared);
        let accuracy = self.config.accuracy();

        let mut ranked: Vec<RankedCandidate<R>> = self
            .records
            .iter()
            .zip(ratings)
            .filter(|(_, rating)| *rating >= accuracy)
            .map(|(record, rating)| RankedCandidate::new(Arc::clone(record), rating))
            .collect();

        // Stable: equal ratings stay in insertion order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            "Ranked {:?}: {}/{} records matched in {:.3}ms",
            query,
            ranked.len(),
            self.records.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        ranked
    }

    #[cfg(not(feature = "parallel"))]
    fn rate_all(&self, query: &PreparedQuery) -> Vec<f64> {
        let mut matcher = Matcher::new(self.config);
        self.records
            .iter()
            .map(|record| matcher.best_rating(query, record.as_ref()))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn rate_all(&self, query: &PreparedQuery) -> Vec<f64> {
        use rayon::prelude::*;

        self.records
            .par_iter()
            .map_init(
                || Matcher::new(self.config),
                |matcher, record| matcher.best_rating(query, record.as_ref()),
            )
            .collect()
    }
}
