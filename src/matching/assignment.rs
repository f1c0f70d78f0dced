//! Bipartite assignment over scored candidates.

use super::traits::{Assigner, MatchCandidate};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Scale used to turn scores into integer weights for Kuhn-Munkres.
const WEIGHT_SCALE: f64 = 1_000_000.0;

/// Deterministic candidate order: score descending, then source index,
/// then target index.
pub(crate) fn candidate_order(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then(a.source_index.cmp(&b.source_index))
        .then(a.target_index.cmp(&b.target_index))
}

/// Highest-score-first assignment with two "used" sets.
///
/// Runs in `O(k log k)` for `k` candidates. Not symmetric: swapping source
/// and target can change the result when scores tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAssigner;

impl Assigner for GreedyAssigner {
    fn assign(&self, mut candidates: Vec<MatchCandidate>) -> Vec<MatchCandidate> {
        candidates.sort_by(candidate_order);

        let mut used_source: HashSet<usize> = HashSet::new();
        let mut used_target: HashSet<usize> = HashSet::new();
        let mut accepted = Vec::new();

        for candidate in candidates {
            if used_source.contains(&candidate.source_index)
                || used_target.contains(&candidate.target_index)
            {
                continue;
            }
            used_source.insert(candidate.source_index);
            used_target.insert(candidate.target_index);
            accepted.push(candidate);
        }

        accepted
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Maximum-total-score assignment (Kuhn-Munkres).
///
/// Missing edges and padding cells both cost zero, so the solver never
/// trades score for extra pairs. Only pairs that were real candidates are
/// ever returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalAssigner;

impl Assigner for OptimalAssigner {
    fn assign(&self, candidates: Vec<MatchCandidate>) -> Vec<MatchCandidate> {
        use pathfinding::kuhn_munkres::kuhn_munkres_min;
        use pathfinding::matrix::Matrix;

        if candidates.is_empty() {
            return Vec::new();
        }

        // Compact index spaces so the matrix only spans elements that have
        // at least one candidate.
        let mut sources: Vec<usize> = candidates.iter().map(|c| c.source_index).collect();
        sources.sort_unstable();
        sources.dedup();
        let mut targets: Vec<usize> = candidates.iter().map(|c| c.target_index).collect();
        targets.sort_unstable();
        targets.dedup();

        let source_pos: HashMap<usize, usize> =
            sources.iter().enumerate().map(|(i, &s)| (s, i)).collect();
        let target_pos: HashMap<usize, usize> =
            targets.iter().enumerate().map(|(i, &t)| (t, i)).collect();

        let mut best: HashMap<(usize, usize), MatchCandidate> = HashMap::new();
        for candidate in &candidates {
            let key = (
                source_pos[&candidate.source_index],
                target_pos[&candidate.target_index],
            );
            let entry = best.entry(key).or_insert(*candidate);
            if candidate.score > entry.score {
                *entry = *candidate;
            }
        }

        let n = sources.len().max(targets.len());
        let weights: Vec<Vec<i64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        best.get(&(i, j))
                            .map_or(0, |c| -((c.score * WEIGHT_SCALE) as i64))
                    })
                    .collect()
            })
            .collect();

        let Ok(matrix) = Matrix::from_rows(weights) else {
            tracing::warn!("Failed to build assignment matrix, falling back to greedy");
            return GreedyAssigner.assign(candidates);
        };

        let (_, assignment) = kuhn_munkres_min(&matrix);

        let mut accepted: Vec<MatchCandidate> = assignment
            .into_iter()
            .enumerate()
            .filter_map(|(i, j)| best.get(&(i, j)).copied())
            .collect();
        accepted.sort_by(candidate_order);
        accepted
    }

    fn name(&self) -> &'static str {
        "optimal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchStrategy;

    fn candidate(s: usize, t: usize, score: f64) -> MatchCandidate {
        MatchCandidate::new(s, t, score, MatchStrategy::TextFuzzy)
    }

    fn pairs(accepted: &[MatchCandidate]) -> Vec<(usize, usize)> {
        let mut p: Vec<_> = accepted
            .iter()
            .map(|c| (c.source_index, c.target_index))
            .collect();
        p.sort_unstable();
        p
    }

    #[test]
    fn test_greedy_takes_highest_first() {
        let accepted = GreedyAssigner.assign(vec![
            candidate(0, 0, 0.9),
            candidate(0, 1, 0.8),
            candidate(1, 0, 0.85),
        ]);
        assert_eq!(pairs(&accepted), vec![(0, 0)]);
    }

    #[test]
    fn test_greedy_tie_break_by_indices() {
        let accepted = GreedyAssigner.assign(vec![
            candidate(1, 0, 0.7),
            candidate(0, 1, 0.7),
            candidate(0, 0, 0.7),
        ]);
        assert_eq!(accepted[0].source_index, 0);
        assert_eq!(accepted[0].target_index, 0);
        assert_eq!(pairs(&accepted), vec![(0, 0)]);
    }

    #[test]
    fn test_optimal_beats_greedy_total() {
        // Greedy grabs (0,0)=0.9 and strands source 1; optimal pairs both.
        let candidates = vec![
            candidate(0, 0, 0.9),
            candidate(0, 1, 0.8),
            candidate(1, 0, 0.85),
        ];
        let greedy = GreedyAssigner.assign(candidates.clone());
        let optimal = OptimalAssigner.assign(candidates);

        assert_eq!(pairs(&greedy), vec![(0, 0)]);
        assert_eq!(pairs(&optimal), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_optimal_prefers_one_strong_pair_over_two_weak() {
        let candidates = vec![
            candidate(0, 0, 0.99),
            candidate(0, 1, 0.4),
            candidate(1, 0, 0.4),
        ];
        let optimal = OptimalAssigner.assign(candidates.clone());
        let greedy = GreedyAssigner.assign(candidates);

        assert_eq!(pairs(&optimal), vec![(0, 0)]);
        let total = |accepted: &[MatchCandidate]| accepted.iter().map(|c| c.score).sum::<f64>();
        assert!(total(&optimal) >= total(&greedy));
    }

    #[test]
    fn test_optimal_never_invents_pairs() {
        let optimal = OptimalAssigner.assign(vec![candidate(3, 7, 0.6), candidate(4, 7, 0.55)]);
        assert_eq!(pairs(&optimal), vec![(3, 7)]);
        assert!(OptimalAssigner.assign(Vec::new()).is_empty());
    }

    #[test]
    fn test_assigners_are_injective() {
        let candidates: Vec<_> = (0..4)
            .flat_map(|s| (0..3).map(move |t| candidate(s, t, 0.5 + 0.01 * (s * 3 + t) as f64)))
            .collect();
        for accepted in [
            GreedyAssigner.assign(candidates.clone()),
            OptimalAssigner.assign(candidates),
        ] {
            let sources: HashSet<_> = accepted.iter().map(|c| c.source_index).collect();
            let targets: HashSet<_> = accepted.iter().map(|c| c.target_index).collect();
            assert_eq!(sources.len(), accepted.len());
            assert_eq!(targets.len(), accepted.len());
            assert_eq!(accepted.len(), 3);
        }
    }
}
