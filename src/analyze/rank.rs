//! Section ranking against a persona/job pair.

use crate::model::{ScoredSection, Section};
use crate::score::RelevanceScorer;

/// Score every section, sort by descending relevance, and retain the
/// top `top_k` with dense 1-based ranks.
///
/// The sort is stable: ties keep their extraction order (document order,
/// then page order). Retained sections keep their full body; output-time
/// truncation is the caller's concern.
pub fn rank_sections(
    sections: Vec<Section>,
    scorer: &RelevanceScorer,
    top_k: usize,
) -> Vec<ScoredSection> {
    let mut scored: Vec<ScoredSection> = sections
        .into_iter()
        .map(|section| {
            let score = scorer.score(&section.body);
            ScoredSection {
                section,
                score,
                rank: 0,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_k);

    for (i, section) in scored.iter_mut().enumerate() {
        section.rank = (i + 1) as u32;
    }

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn section(doc: &str, title: &str, body: &str) -> Section {
        Section {
            document: doc.to_string(),
            page: 1,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_ranks_are_dense_permutation() {
        let scorer = RelevanceScorer::new("Researcher", "understand machine learning trends");
        let sections = vec![
            section("a.pdf", "One", "machine learning research trends and data analysis"),
            section("a.pdf", "Two", "completely unrelated cooking recipes and garden tips"),
            section("b.pdf", "Three", "research findings on machine learning methodology"),
            section("b.pdf", "Four", "trends in machine learning experiment results"),
        ];

        let ranked = rank_sections(sections, &scorer, 3);
        assert_eq!(ranked.len(), 3);
        let ranks: HashSet<u32> = ranked.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, HashSet::from([1, 2, 3]));
        // Descending by score.
        assert!(ranked[0].score >= ranked[1].score);
        assert!(ranked[1].score >= ranked[2].score);
    }

    #[test]
    fn test_tied_scores_keep_extraction_order() {
        let scorer = RelevanceScorer::new("Researcher", "understand machine learning trends");
        // Identical bodies score identically.
        let body = "machine learning research trends discussed at length here";
        let sections = vec![
            section("first.pdf", "A", body),
            section("second.pdf", "B", body),
            section("third.pdf", "C", body),
        ];

        let ranked = rank_sections(sections, &scorer, 3);
        let docs: Vec<&str> = ranked.iter().map(|s| s.section.document.as_str()).collect();
        assert_eq!(docs, vec!["first.pdf", "second.pdf", "third.pdf"]);
    }

    #[test]
    fn test_top_k_smaller_than_input() {
        let scorer = RelevanceScorer::new("Analyst", "evaluate performance metrics");
        let sections = vec![section("a.pdf", "Only", "performance metrics evaluation data")];
        let ranked = rank_sections(sections, &scorer, 20);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_full_body_retained() {
        let scorer = RelevanceScorer::new("Analyst", "evaluate metrics");
        let long_body = "metrics ".repeat(200);
        let sections = vec![section("a.pdf", "Long", &long_body)];
        let ranked = rank_sections(sections, &scorer, 1);
        assert_eq!(ranked[0].section.body.len(), long_body.len());
    }
}
