//! Relevance scoring between text and a (persona, job-to-be-done) pair.
//!
//! The scorer combines four weighted sub-scores and clamps the result to
//! [0, 1]. It is the single source of relevance truth: section ranking,
//! sentence extraction, and text refinement all call [`RelevanceScorer::score`].

use std::collections::{HashMap, HashSet};

use crate::text::tokenize;

/// Weight of persona token overlap in the combined score.
const PERSONA_WEIGHT: f32 = 0.3;
/// Weight of job token overlap in the combined score.
const JOB_WEIGHT: f32 = 0.4;
/// Weight of the TF-IDF-like component.
const TFIDF_WEIGHT: f32 = 0.2;
/// Weight of the domain-keyword component.
const DOMAIN_WEIGHT: f32 = 0.1;

/// Notional corpus size for the fixed pseudo-IDF. No real corpus
/// statistics are computed.
const PSEUDO_IDF_CORPUS: f32 = 10.0;

/// Keyword lists per recognized persona domain. A persona matches a domain
/// by case-insensitive substring ("PhD Researcher" matches "researcher").
const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "researcher",
        &[
            "research",
            "study",
            "analysis",
            "methodology",
            "results",
            "findings",
            "experiment",
            "data",
            "hypothesis",
            "conclusion",
        ],
    ),
    (
        "student",
        &[
            "learn", "study", "understand", "concept", "theory", "example", "practice",
            "exercise", "homework", "exam",
        ],
    ),
    (
        "analyst",
        &[
            "analysis",
            "data",
            "trend",
            "performance",
            "metrics",
            "insights",
            "report",
            "statistics",
            "evaluation",
            "assessment",
        ],
    ),
    (
        "business",
        &[
            "strategy",
            "market",
            "revenue",
            "growth",
            "profit",
            "customer",
            "sales",
            "business",
            "company",
            "investment",
        ],
    ),
    (
        "technical",
        &[
            "system",
            "implementation",
            "design",
            "architecture",
            "technology",
            "development",
            "software",
            "hardware",
            "algorithm",
            "code",
        ],
    ),
];

/// Computes a bounded relevance score between text and a persona/job pair.
///
/// Pre-tokenizes the persona and job once so that scoring many fragments
/// against the same pair does not repeat the work.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    persona_tokens: Vec<String>,
    job_tokens: Vec<String>,
    domain_keywords: Vec<String>,
}

impl RelevanceScorer {
    /// Create a scorer for the given persona and job-to-be-done.
    pub fn new(persona: &str, job: &str) -> Self {
        let persona_tokens = tokenize(persona);
        let job_tokens = tokenize(job);
        let domain_keywords = resolve_domain_keywords(persona, &job_tokens);

        Self {
            persona_tokens,
            job_tokens,
            domain_keywords,
        }
    }

    /// Score `text` against the persona/job pair. Always in [0, 1];
    /// 0.0 for empty or content-free text.
    pub fn score(&self, text: &str) -> f32 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let text_tokens = tokenize(text);
        if text_tokens.is_empty() {
            return 0.0;
        }

        let persona_score = token_overlap(&text_tokens, &self.persona_tokens);
        let job_score = token_overlap(&text_tokens, &self.job_tokens);
        let tfidf_score = self.tfidf_score(&text_tokens);
        let domain_score = self.domain_score(text);

        let combined = persona_score * PERSONA_WEIGHT
            + job_score * JOB_WEIGHT
            + tfidf_score * TFIDF_WEIGHT
            + domain_score * DOMAIN_WEIGHT;

        // Components can individually exceed their natural bounds, so the
        // final clamp is mandatory.
        combined.min(1.0)
    }

    /// TF-IDF-like score: term frequency of each key term present in the
    /// text, scaled by a fixed pseudo-IDF, summed and clamped.
    fn tfidf_score(&self, text_tokens: &[String]) -> f32 {
        if text_tokens.is_empty() {
            return 0.0;
        }

        let key_terms: HashSet<&str> = self
            .persona_tokens
            .iter()
            .chain(self.job_tokens.iter())
            .map(String::as_str)
            .collect();
        if key_terms.is_empty() {
            return 0.0;
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for tok in text_tokens {
            *counts.entry(tok.as_str()).or_insert(0) += 1;
        }
        let total = text_tokens.len() as f32;
        let idf = PSEUDO_IDF_CORPUS.ln();

        let mut score = 0.0;
        for term in key_terms {
            if let Some(&count) = counts.get(term) {
                let tf = count as f32 / total;
                score += tf * idf;
            }
        }

        score.min(1.0)
    }

    /// Fraction of the active domain keywords found as substrings anywhere
    /// in the lower-cased text.
    fn domain_score(&self, text: &str) -> f32 {
        if self.domain_keywords.is_empty() {
            return 0.0;
        }

        let text_lower = text.to_lowercase();
        let matches = self
            .domain_keywords
            .iter()
            .filter(|kw| text_lower.contains(kw.as_str()))
            .count();

        (matches as f32 / self.domain_keywords.len() as f32).min(1.0)
    }
}

/// Union of keyword lists for every domain whose name appears in the
/// persona; falls back to the job's own tokens when no domain matches.
fn resolve_domain_keywords(persona: &str, job_tokens: &[String]) -> Vec<String> {
    let persona_lower = persona.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for (domain, words) in DOMAIN_KEYWORDS {
        if persona_lower.contains(domain) {
            keywords.extend(words.iter().map(|w| w.to_string()));
        }
    }

    if keywords.is_empty() {
        keywords = job_tokens.to_vec();
    }

    keywords
}

/// Average of Jaccard similarity and target-coverage between two token
/// lists, treated as sets. Returns 0.0 if the target set is empty.
fn token_overlap(text_tokens: &[String], target_tokens: &[String]) -> f32 {
    if target_tokens.is_empty() {
        return 0.0;
    }

    let text_set: HashSet<&str> = text_tokens.iter().map(String::as_str).collect();
    let target_set: HashSet<&str> = target_tokens.iter().map(String::as_str).collect();

    let intersection = text_set.intersection(&target_set).count() as f32;
    let union = text_set.union(&target_set).count() as f32;

    let jaccard = if union > 0.0 { intersection / union } else { 0.0 };
    let coverage = intersection / target_set.len() as f32;

    (jaccard + coverage) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounded() {
        let scorer = RelevanceScorer::new("Researcher", "analyze research data");
        let score = scorer.score(
            "research data analysis research data analysis research data analysis \
             research study methodology results findings experiment hypothesis",
        );
        assert!((0.0..=1.0).contains(&score));
        assert!(score > 0.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let scorer = RelevanceScorer::new("Researcher", "understand trends");
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score("   \n  "), 0.0);
        // Tokenizes to nothing: only digits and stopwords
        assert_eq!(scorer.score("42 and the of 7"), 0.0);
    }

    #[test]
    fn test_persona_job_weights_are_asymmetric() {
        // Swapping persona and job must change the score because the job
        // is weighted 0.4 and the persona 0.3.
        let text = "machine learning trends";
        let a = RelevanceScorer::new("machine learning", "cooking recipes");
        let b = RelevanceScorer::new("cooking recipes", "machine learning");
        let score_a = a.score(text);
        let score_b = b.score(text);
        assert!((score_a - score_b).abs() > 1e-6);
        // The job-matching orientation scores higher.
        assert!(score_b > score_a);
    }

    #[test]
    fn test_domain_keywords_from_persona() {
        let keywords = resolve_domain_keywords("Senior Data Analyst", &[]);
        assert!(keywords.contains(&"metrics".to_string()));
        assert!(!keywords.is_empty());
    }

    #[test]
    fn test_domain_keywords_union_for_multiple_domains() {
        let keywords = resolve_domain_keywords("Business Analyst", &[]);
        assert!(keywords.contains(&"revenue".to_string()));
        assert!(keywords.contains(&"metrics".to_string()));
    }

    #[test]
    fn test_domain_falls_back_to_job_tokens() {
        let job_tokens = tokenize("plan travel itinerary");
        let keywords = resolve_domain_keywords("Travel Planner", &job_tokens);
        assert_eq!(keywords, job_tokens);
    }

    #[test]
    fn test_token_overlap_empty_target() {
        let text = tokenize("some content here");
        assert_eq!(token_overlap(&text, &[]), 0.0);
    }

    #[test]
    fn test_token_overlap_identical_sets() {
        let tokens = tokenize("machine learning trends");
        // Jaccard 1.0 and coverage 1.0 average to 1.0.
        assert!((token_overlap(&tokens, &tokens) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_score_deterministic() {
        let scorer = RelevanceScorer::new("Researcher", "understand machine learning trends");
        let text = "Machine learning adoption grew steadily across research labs.";
        assert_eq!(scorer.score(text), scorer.score(text));
    }
}
