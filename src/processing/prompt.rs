//! Prompt construction and the token-budget heuristic.
//!
//! The provider bills by tokens but this service never tokenizes locally: prompt
//! length is bounded by the four-characters-per-token approximation instead.

use super::types::SummariseError;

/// Approximate number of characters per provider token.
pub(crate) const CHARS_PER_TOKEN: usize = 4;
/// Maximum approximate token count accepted for a document.
pub(crate) const MAX_PROMPT_TOKENS: usize = 1500;
/// Token budget granted to the completion model for the summary itself.
pub(crate) const MAX_SUMMARY_TOKENS: u32 = 250;

/// Estimate the token count of `text` using the character heuristic.
pub(crate) fn approximate_token_count(text: &str) -> f64 {
    text.chars().count() as f64 / CHARS_PER_TOKEN as f64
}

/// Reject documents whose estimated token count exceeds the prompt budget.
pub(crate) fn ensure_within_token_budget(text: &str) -> Result<(), SummariseError> {
    let estimated = approximate_token_count(text);
    if estimated > MAX_PROMPT_TOKENS as f64 {
        return Err(SummariseError::DocumentTooLong {
            estimated: estimated.ceil() as usize,
            limit: MAX_PROMPT_TOKENS,
        });
    }
    Ok(())
}

/// Render the summarisation instruction around the document text.
pub(crate) fn build_summary_prompt(document: &str) -> String {
    format!("Summarise the following text in 6 sentences:\n\nText: ###\n{document}\n###")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_document_between_markers() {
        let prompt = build_summary_prompt("Water boils at 100 degrees.");
        assert_eq!(
            prompt,
            "Summarise the following text in 6 sentences:\n\nText: ###\nWater boils at 100 degrees.\n###"
        );
    }

    #[test]
    fn budget_accepts_document_at_exact_limit() {
        let document = "a".repeat(MAX_PROMPT_TOKENS * CHARS_PER_TOKEN);
        assert!(ensure_within_token_budget(&document).is_ok());
    }

    #[test]
    fn budget_rejects_document_one_character_over() {
        let document = "a".repeat(MAX_PROMPT_TOKENS * CHARS_PER_TOKEN + 1);
        let error = ensure_within_token_budget(&document).unwrap_err();
        match error {
            SummariseError::DocumentTooLong { estimated, limit } => {
                assert_eq!(estimated, MAX_PROMPT_TOKENS + 1);
                assert_eq!(limit, MAX_PROMPT_TOKENS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn budget_counts_characters_not_bytes() {
        // Multibyte characters still count once each.
        let document = "é".repeat(MAX_PROMPT_TOKENS * CHARS_PER_TOKEN);
        assert!(ensure_within_token_budget(&document).is_ok());
    }
}
