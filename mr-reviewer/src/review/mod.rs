//! Review generation and parsing.
//!
//! Flow:
//!   1) [`generator::ReviewGenerator`] sends the truncated diff plus the fixed
//!      template ([`prompt`]) to the LLM; failures come back as marked text.
//!   2) [`ReviewResult::parse`] extracts the rating token and keeps the full
//!      markdown as the summary body.
//!   3) [`feedback::extract_inline_directives`] pulls anchored per-line
//!      suggestions for providers that accept inline comments.

pub mod feedback;
pub mod generator;
pub mod prompt;

pub use feedback::{InlineCommentDirective, extract_inline_directives};
pub use generator::ReviewGenerator;

/// Prefix marking generator output that describes a failure instead of a review.
pub const ERROR_MARKER: &str = "❌ Error";

const RATING_PREFIX: &str = "Rating:";
const NO_RATING: &str = "N/A";

/// Parsed generator output for one change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewResult {
    /// e.g. `7/10`, or `N/A`.
    pub rating: String,
    /// Full markdown, posted as the summary comment.
    pub feedback: String,
}

impl ReviewResult {
    pub fn parse(output: &str) -> Self {
        let feedback = output.trim().to_string();

        let rating = if feedback.is_empty() || feedback.contains(ERROR_MARKER) {
            None
        } else {
            feedback
                .lines()
                .next()
                .and_then(|first| first.trim().strip_prefix(RATING_PREFIX))
                .map(str::trim)
                .filter(|r| !r.is_empty())
        };

        Self {
            rating: rating.unwrap_or(NO_RATING).to_string(),
            feedback,
        }
    }

    /// True when the feedback carries an error marker instead of a review.
    pub fn is_error(&self) -> bool {
        self.feedback.contains(ERROR_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_is_taken_from_first_line() {
        let r = ReviewResult::parse("Rating: 7/10\n\n# 🤖 AI PR Review\n");
        assert_eq!(r.rating, "7/10");
        assert!(r.feedback.starts_with("Rating: 7/10"));
        assert!(!r.is_error());
    }

    #[test]
    fn empty_output_has_no_rating() {
        let r = ReviewResult::parse("   \n");
        assert_eq!(r.rating, "N/A");
        assert_eq!(r.feedback, "");
    }

    #[test]
    fn error_marker_forces_na() {
        let r = ReviewResult::parse("Rating: 9/10\n❌ Error: LLM API call failed. timeout");
        assert_eq!(r.rating, "N/A");
        assert!(r.is_error());
    }

    #[test]
    fn missing_rating_line_is_na() {
        let r = ReviewResult::parse("# Review\nRating: 3/10");
        assert_eq!(r.rating, "N/A");
    }
}
