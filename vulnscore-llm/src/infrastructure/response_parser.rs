//! Extraction of CVSS vectors from free-form model output
//!
//! Models asked for a bare vector still sometimes wrap it in prose or a code
//! fence. Generation returns the raw reply; callers that want the vector token
//! alone run it through [`ResponseParser::extract_cvss_vector`].

/// Utilities for pulling structured values out of LLM responses.
pub struct ResponseParser;

impl ResponseParser {
    /// Find the first `CVSS:3.x/...` vector in `content`.
    ///
    /// The vector ends at the first character that cannot appear in a vector
    /// (whitespace, backtick, quote, comma, ...). A sentence-ending period is
    /// dropped. Bare version mentions such as `CVSS:3.1 guidance` are skipped.
    pub fn extract_cvss_vector(content: &str) -> Option<String> {
        content
            .match_indices("CVSS:3.")
            .map(|(start, _)| Self::vector_token(&content[start..]))
            .find(|token| token.contains('/'))
            .map(str::to_string)
    }

    fn vector_token(candidate: &str) -> &str {
        let end = candidate
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, ':' | '/' | '.')))
            .unwrap_or(candidate.len());

        candidate[..end].trim_end_matches('.')
    }
}
