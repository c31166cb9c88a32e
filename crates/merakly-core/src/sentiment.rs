// ── Sentiment gate ──
//
// VADER compound score over the query. A score below THRESHOLD
// short-circuits the chat turn with a fixed reply; nothing is routed.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound scores strictly below this end the turn early.
pub const THRESHOLD: f64 = -0.2;

pub const EMPATHY_MESSAGE: &str =
    "It seems you're frustrated. Let me assist you as quickly as possible.";

/// Evaluate a query. `Some(message)` means: reply with it and stop routing.
pub fn evaluate(query: &str) -> Option<&'static str> {
    (compound_score(query) < THRESHOLD).then_some(EMPATHY_MESSAGE)
}

/// Normalized affect score in `[-1.0, 1.0]`; 0.0 for neutral or blank text.
pub fn compound_score(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let analyzer = SentimentIntensityAnalyzer::new();
    analyzer
        .polarity_scores(text)
        .get("compound")
        .copied()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn furious_query_is_gated() {
        let score = compound_score("I am furious, nothing works");
        assert!(score < THRESHOLD, "score {score}");
        assert_eq!(evaluate("I am furious, nothing works"), Some(EMPATHY_MESSAGE));
    }

    #[test]
    fn everyday_frustration_is_gated() {
        for q in [
            "this shit keeps dropping",
            "I'm sick of these outages",
            "I am so pissed off at this network",
        ] {
            let score = compound_score(q);
            assert!(score < THRESHOLD, "{q}: {score}");
            assert_eq!(evaluate(q), Some(EMPATHY_MESSAGE), "{q}");
        }
    }

    #[test]
    fn neutral_queries_pass() {
        for q in ["show me the vpn status", "list clients", "", "   "] {
            assert!(compound_score(q).abs() < f64::EPSILON, "{q}");
            assert_eq!(evaluate(q), None, "{q}");
        }
    }

    #[test]
    fn negation_flips_valence() {
        assert!(compound_score("this is bad") < 0.0);
        assert!(compound_score("this is not bad") > 0.0);
        assert_eq!(evaluate("this is not bad"), None);
    }

    #[test]
    fn boosters_intensify() {
        assert!(compound_score("very bad") < compound_score("bad"));
    }

    #[test]
    fn scores_are_bounded() {
        let s = compound_score("worst worst worst horrible terrible disaster hate hate!!!!");
        assert!((-1.0..=1.0).contains(&s));
        assert!(s < -0.9);
    }

    #[test]
    fn positive_queries_pass() {
        assert!(compound_score("thanks, great work! list devices please") > 0.0);
        assert_eq!(evaluate("thanks, great work! list devices please"), None);
    }
}
