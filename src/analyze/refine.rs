//! Subsection refinement: condensing top-ranked sections into the
//! sentences most relevant to the persona and job.

use crate::model::{RefinedExcerpt, ScoredSection};
use crate::score::RelevanceScorer;

/// Sentences at or under this length are ignored entirely.
const MIN_SENTENCE_LEN: usize = 20;

/// Refined text shorter than this gets one extra sentence appended when
/// one is available.
const SHORT_REFINEMENT_LEN: usize = 100;

/// Number of top sentences joined into a refinement.
const REFINE_SENTENCES: usize = 3;

/// Texts shorter than this are passed through unrefined.
const MIN_REFINE_INPUT_LEN: usize = 50;

/// Extracts and condenses key points from top-ranked sections.
pub struct SubsectionRefiner<'a> {
    scorer: &'a RelevanceScorer,
}

impl<'a> SubsectionRefiner<'a> {
    /// Create a refiner over an existing scorer.
    pub fn new(scorer: &'a RelevanceScorer) -> Self {
        Self { scorer }
    }

    /// Refine the first `refine_sections` ranked sections into excerpts,
    /// keeping the `top_k` highest-scored overall.
    ///
    /// Each excerpt's `relevance_score` is a per-section countdown
    /// (key-point count minus key-point index); the final sort is stable,
    /// so ties keep insertion order.
    pub fn refine(
        &self,
        ranked: &[ScoredSection],
        refine_sections: usize,
        key_points_per_section: usize,
        top_k: usize,
    ) -> Vec<RefinedExcerpt> {
        let mut excerpts = Vec::new();

        for scored in ranked.iter().take(refine_sections) {
            let key_points = self.extract_key_points(&scored.section.body, key_points_per_section);
            let count = key_points.len() as i32;

            for (i, point) in key_points.iter().enumerate() {
                excerpts.push(RefinedExcerpt {
                    document: scored.section.document.clone(),
                    page: scored.section.page,
                    refined_text: self.refine_text(point),
                    relevance_score: count - i as i32,
                });
            }
        }

        excerpts.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        excerpts.truncate(top_k);
        excerpts
    }

    /// Split text into sentences and keep the highest-scoring few.
    fn extract_key_points(&self, text: &str, limit: usize) -> Vec<String> {
        let mut scored = self.scored_sentences(text);
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.into_iter().take(limit).map(|(s, _)| s).collect()
    }

    /// Condense a text fragment to its most relevant sentences, ending
    /// with a single period.
    fn refine_text(&self, text: &str) -> String {
        if text.chars().count() < MIN_REFINE_INPUT_LEN {
            return text.to_string();
        }

        let mut scored = self.scored_sentences(text);
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut refined = scored
            .iter()
            .take(REFINE_SENTENCES)
            .map(|(s, _)| s.as_str())
            .collect::<Vec<_>>()
            .join(". ");

        // Pad an under-length refinement with the next-best sentence.
        if refined.chars().count() < SHORT_REFINEMENT_LEN {
            if let Some((extra, _)) = scored.get(REFINE_SENTENCES) {
                refined.push_str(". ");
                refined.push_str(extra);
            }
        }

        let refined = refined.trim();
        if refined.is_empty() || refined.ends_with('.') {
            refined.to_string()
        } else {
            format!("{}.", refined)
        }
    }

    /// Sentence-split on terminal punctuation and score each sentence
    /// longer than the minimum length.
    fn scored_sentences(&self, text: &str) -> Vec<(String, f32)> {
        text.split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| s.chars().count() > MIN_SENTENCE_LEN)
            .map(|s| (s.to_string(), self.scorer.score(s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn scored_section(doc: &str, body: &str) -> ScoredSection {
        ScoredSection {
            section: Section {
                document: doc.to_string(),
                page: 1,
                title: "T".to_string(),
                body: body.to_string(),
            },
            score: 0.5,
            rank: 1,
        }
    }

    fn scorer() -> RelevanceScorer {
        RelevanceScorer::new("Researcher", "understand machine learning trends")
    }

    #[test]
    fn test_short_sentences_ignored() {
        let s = scorer();
        let refiner = SubsectionRefiner::new(&s);
        let body = "Tiny. Also small. Machine learning research trends were analyzed across labs this year.";
        let points = refiner.extract_key_points(body, 5);
        assert_eq!(points.len(), 1);
        assert!(points[0].contains("Machine learning"));
    }

    #[test]
    fn test_refined_text_ends_with_period() {
        let s = scorer();
        let refiner = SubsectionRefiner::new(&s);
        let body = "Machine learning research trends were analyzed across several labs. \
                    The study of learning systems produced new research findings. \
                    Trends in the machine learning field continue to evolve quickly.";
        let refined = refiner.refine_text(body);
        assert!(refined.ends_with('.'));
        assert!(!refined.ends_with(".."));
    }

    #[test]
    fn test_countdown_scores_descend_within_section() {
        let s = scorer();
        let refiner = SubsectionRefiner::new(&s);
        let body = "Machine learning research trends were analyzed across several labs. \
                    The study of learning systems produced new research findings. \
                    Trends in the machine learning field continue to evolve quickly. \
                    Researchers published machine learning methodology experiments widely.";
        let ranked = vec![scored_section("a.pdf", body)];

        let excerpts = refiner.refine(&ranked, 10, 5, 15);
        assert!(!excerpts.is_empty());
        // Countdown: first key point gets the highest integer score.
        let scores: Vec<i32> = excerpts.iter().map(|e| e.relevance_score).collect();
        let mut sorted = scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
        assert_eq!(scores[0], excerpts.len() as i32);
    }

    #[test]
    fn test_top_k_limit_respected() {
        let s = scorer();
        let refiner = SubsectionRefiner::new(&s);
        let body = "Machine learning research trends were analyzed across several labs. \
                    The study of learning systems produced new research findings. \
                    Trends in the machine learning field continue to evolve quickly. \
                    Researchers published machine learning methodology experiments widely. \
                    Analysis of learning data revealed steady research trends everywhere.";
        let ranked = vec![
            scored_section("a.pdf", body),
            scored_section("b.pdf", body),
            scored_section("c.pdf", body),
            scored_section("d.pdf", body),
        ];

        let excerpts = refiner.refine(&ranked, 10, 5, 15);
        assert_eq!(excerpts.len(), 15);
    }

    #[test]
    fn test_short_input_passes_through() {
        let s = scorer();
        let refiner = SubsectionRefiner::new(&s);
        assert_eq!(refiner.refine_text("Short fragment"), "Short fragment");
    }
}
