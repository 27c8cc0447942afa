use rec_core::config::InterestWeights;
use rec_core::{Article, Recommendation, Strategy};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct InterestMatch {
    pub score: f64,
    /// Terms as the user wrote them, in interest order
    pub matched_terms: Vec<String>,
}

#[derive(Debug, Clone)]
struct Term<'a> {
    original: &'a str,
    lowered: String,
}

/// Interest terms trimmed, lowercased and de-duplicated. Blank terms are
/// dropped since they would match every article.
fn prepare_terms(interests: &[String]) -> Vec<Term<'_>> {
    let mut seen = HashSet::new();
    interests
        .iter()
        .map(|raw| raw.trim())
        .filter(|term| !term.is_empty())
        .filter_map(|term| {
            let lowered = term.to_lowercase();
            seen.insert(lowered.clone()).then_some(Term { original: term, lowered })
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct InterestMatcher {
    weights: InterestWeights,
}

impl InterestMatcher {
    pub fn new(weights: InterestWeights) -> Self {
        Self { weights }
    }

    /// Score one article against a user's interests, `None` when no term matches.
    pub fn score(&self, interests: &[String], article: &Article) -> Option<InterestMatch> {
        self.score_terms(&prepare_terms(interests), article)
    }

    fn score_terms(&self, terms: &[Term<'_>], article: &Article) -> Option<InterestMatch> {
        if terms.is_empty() {
            return None;
        }

        let title = article.title.to_lowercase();
        let summary = article.summary.as_deref().map(str::to_lowercase);
        let content = article.content.to_lowercase();

        let mut score = 0.0;
        let mut matched_terms = Vec::new();
        for term in terms {
            let in_title = title.contains(&term.lowered);
            let in_summary = summary.as_deref().is_some_and(|s| s.contains(&term.lowered));
            let in_content = content.contains(&term.lowered);

            if !(in_title || in_summary || in_content) {
                continue;
            }
            // Fields are additive: a term found everywhere earns all three weights
            if in_title {
                score += self.weights.title;
            }
            if in_summary {
                score += self.weights.summary;
            }
            if in_content {
                score += self.weights.content;
            }
            matched_terms.push(term.original.to_string());
        }

        if matched_terms.is_empty() {
            return None;
        }
        score += self.weights.multi_match_bonus * matched_terms.len() as f64;

        Some(InterestMatch { score, matched_terms })
    }

    /// Best interest matches among `candidates`, highest score first.
    /// Equal scores keep candidate order.
    pub fn recommend(&self, interests: &[String], candidates: &[Article], limit: usize) -> Vec<Recommendation> {
        let terms = prepare_terms(interests);
        if terms.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut recommendations: Vec<Recommendation> = candidates
            .iter()
            .filter_map(|article| {
                self.score_terms(&terms, article).map(|m| Recommendation {
                    article: article.clone(),
                    score: m.score,
                    reason: format!("Matches your interests: {}", m.matched_terms.join(", ")),
                    strategy: Strategy::InterestBased,
                    matched_interests: Some(m.matched_terms),
                })
            })
            .collect();

        recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
        recommendations.truncate(limit);
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interests(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_title_and_summary_weights() {
        let matcher = InterestMatcher::default();
        let article = Article::new(
            "a1",
            "Advanced TypeScript Programming Techniques",
            "Generics, conditional types and inference.",
            "dev",
        )
        .with_summary("A deep dive into tech concepts for seasoned developers");

        let m = matcher.score(&interests(&["tech", "programming"]), &article).unwrap();
        // "tech": title ("Techniques") 3 + summary 2; "programming": title 3; two terms matched, bonus 1.0
        assert_eq!(m.score, 9.0);
        assert_eq!(m.matched_terms, vec!["tech", "programming"]);
    }

    #[test]
    fn test_term_in_every_field_is_additive() {
        let matcher = InterestMatcher::default();
        let article = Article::new("a1", "Rust news", "All about rust", "dev").with_summary("rust weekly");

        let m = matcher.score(&interests(&["rust"]), &article).unwrap();
        assert_eq!(m.score, 3.0 + 2.0 + 1.0 + 0.5);
    }

    #[test]
    fn test_content_only_match() {
        let matcher = InterestMatcher::default();
        let article = Article::new("a1", "Weekly digest", "Some notes about databases", "dev");

        let m = matcher.score(&interests(&["DATABASES"]), &article).unwrap();
        assert_eq!(m.score, 1.5);
        assert_eq!(m.matched_terms, vec!["DATABASES"]);
    }

    #[test]
    fn test_no_match_and_blank_terms() {
        let matcher = InterestMatcher::default();
        let article = Article::new("a1", "Gardening", "Tomatoes", "dev");

        assert!(matcher.score(&interests(&["rust"]), &article).is_none());
        assert!(matcher.score(&interests(&["", "   "]), &article).is_none());
        assert!(matcher.score(&[], &article).is_none());
    }

    #[test]
    fn test_duplicate_terms_count_once() {
        let matcher = InterestMatcher::default();
        let article = Article::new("a1", "Rust", "", "dev");

        let m = matcher.score(&interests(&["rust", "Rust", " RUST "]), &article).unwrap();
        assert_eq!(m.score, 3.5);
        assert_eq!(m.matched_terms, vec!["rust"]);
    }

    #[test]
    fn test_recommend_orders_and_truncates() {
        let matcher = InterestMatcher::default();
        let candidates = vec![
            Article::new("content", "Digest", "rust inside", "dev"),
            Article::new("title", "Rust", "", "dev"),
            Article::new("tie", "Another digest", "rust again", "dev"),
            Article::new("none", "Cooking", "pasta", "dev"),
        ];

        let recs = matcher.recommend(&interests(&["rust"]), &candidates, 10);
        let ids: Vec<_> = recs.iter().map(|r| r.article.id.as_str()).collect();
        assert_eq!(ids, vec!["title", "content", "tie"]);
        assert!(recs.iter().all(|r| r.strategy == Strategy::InterestBased));
        assert_eq!(recs[0].reason, "Matches your interests: rust");

        let recs = matcher.recommend(&interests(&["rust"]), &candidates, 2);
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn test_custom_weights() {
        let matcher = InterestMatcher::new(InterestWeights {
            title: 10.0,
            summary: 0.0,
            content: 0.0,
            multi_match_bonus: 0.0,
        });
        let article = Article::new("a1", "Rust", "rust", "dev");
        assert_eq!(matcher.score(&interests(&["rust"]), &article).unwrap().score, 10.0);
    }
}
