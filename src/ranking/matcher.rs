use crate::config::SearchConfig;
use crate::ranking::normalize::{normalize, TextRole};
use crate::ranking::{FieldKind, Searchable, REJECTED_SCORE};

/// Longest-common-subsequence DP with a reusable row buffer.
///
/// Keeps only the previous row of the `|a| + 1` by `|b| + 1` table, so
/// lengths are identical to the full-table recurrence.
#[derive(Debug, Default, Clone)]
pub struct LcsTable {
    row: Vec<usize>,
}

impl LcsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lcs_len(&mut self, a: &[char], b: &[char]) -> usize {
        self.row.clear();
        self.row.resize(b.len() + 1, 0);

        for &ca in a {
            // table[i-1][j-1]
            let mut diag = 0;
            for j in 1..=b.len() {
                let up = self.row[j];
                self.row[j] = if ca == b[j - 1] {
                    diag + 1
                } else {
                    self.row[j - 1].max(up)
                };
                diag = up;
            }
        }

        self.row[b.len()]
    }
}

/// Query text ready to be rated against many candidates.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    chars: Vec<char>,
    /// Character count of the raw query, before whitespace stripping
    raw_len: usize,
}

impl PreparedQuery {
    pub fn new(query: &str, config: &SearchConfig) -> Self {
        Self {
            chars: normalize(query, TextRole::Query, config.include_whitespace())
                .chars()
                .collect(),
            raw_len: query.chars().count(),
        }
    }

    /// Normalized characters compared by the DP
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    /// A field must have an LCS strictly greater than this to count.
    ///
    /// Scaled by the raw length, not the normalized one.
    pub fn local_threshold(&self, accuracy: f64) -> f64 {
        // raw length on purpose: stripped whitespace still counts against the query
        self.raw_len as f64 / accuracy
    }
}

/// Rates candidate strings against a prepared query.
///
/// Holds scratch buffers; one matcher per thread.
#[derive(Debug, Clone)]
pub struct Matcher {
    config: SearchConfig,
    table: LcsTable,
    candidate: Vec<char>,
}

impl Matcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            table: LcsTable::new(),
            candidate: Vec::new(),
        }
    }

    pub fn prepare(&self, query: &str) -> PreparedQuery {
        PreparedQuery::new(query, &self.config)
    }

    /// LCS length (plus the name bonus) when it beats the local threshold,
    /// otherwise [`REJECTED_SCORE`].
    pub fn rate(&mut self, query: &PreparedQuery, candidate: &str, field: FieldKind) -> f64 {
        self.candidate.clear();
        self.candidate.extend(
            normalize(candidate, TextRole::Candidate, self.config.include_whitespace()).chars(),
        );

        let lcs = self.table.lcs_len(query.chars(), &self.candidate) as f64;

        if lcs > query.local_threshold(self.config.accuracy()) {
            lcs + field.bonus()
        } else {
            REJECTED_SCORE
        }
    }

    /// Max over the name rating and every tag rating.
    pub fn best_rating<R: Searchable + ?Sized>(
        &mut self,
        query: &PreparedQuery,
        record: &R,
    ) -> f64 {
        let mut best = self.rate(query, record.primary_name(), FieldKind::Name);
        for tag in record.tags() {
            best = best.max(self.rate(query, tag, FieldKind::Tag));
        }
        best
    }
}

/// One-off rating of a single (query, candidate) pair.
pub fn rate(query: &str, candidate: &str, field: FieldKind, config: &SearchConfig) -> f64 {
    let mut matcher = Matcher::new(*config);
    let query = matcher.prepare(query);
    matcher.rate(&query, candidate, field)
}
