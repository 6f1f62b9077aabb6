//! Relevance Ranking

/// Ordered (descriptor, score) pairs, best first. Ties keep the
/// descriptor definition order (the sort is stable).
pub type Ranking = Vec<(String, f64)>;

/// Pair names with scores and sort by descending score.
pub fn rank(names: &[String], scores: &[f64]) -> Ranking {
    let mut ranking: Ranking = names
        .iter()
        .cloned()
        .zip(scores.iter().copied())
        .collect();
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranking
}

/// The first `k` descriptor names of a ranking.
pub fn top_k(ranking: &Ranking, k: usize) -> Vec<String> {
    ranking.iter().take(k).map(|(name, _)| name.clone()).collect()
}
