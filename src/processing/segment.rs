//! Sentence and paragraph segmentation.
//!
//! Summaries are segmented with `segtok`, a rule-based splitter that needs no
//! model download; documents are segmented on line boundaries.

use segtok::segmenter::{SegmentConfig, split_single};

use super::types::SegmentError;

/// Split the generated summary into sentences ready for embedding.
///
/// Sentences are trimmed and empties dropped. When more than one sentence
/// survives, the last is discarded: the completion runs under a fixed output
/// token budget, so the final sentence is routinely cut off mid-thought. A
/// single-sentence summary is kept whole.
pub(crate) fn split_summary_sentences(summary: &str) -> Result<Vec<String>, SegmentError> {
    let mut sentences: Vec<String> = split_single(summary, SegmentConfig::default())
        .into_iter()
        .map(|sentence| sentence.trim().to_string())
        .filter(|sentence| !sentence.is_empty())
        .collect();

    if sentences.is_empty() {
        return Err(SegmentError::NoSentences);
    }
    if sentences.len() > 1 {
        sentences.pop();
    }
    Ok(sentences)
}

/// Split the source document into its non-empty lines.
pub(crate) fn split_paragraphs(document: &str) -> Vec<String> {
    document
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_trailing_sentence_when_more_than_one() {
        let summary =
            "The fox jumps over the fence. The dog sleeps in the yard. The bird sings at dawn.";
        let sentences = split_summary_sentences(summary).expect("sentences");
        assert_eq!(
            sentences,
            vec![
                "The fox jumps over the fence.".to_string(),
                "The dog sleeps in the yard.".to_string(),
            ]
        );
    }

    #[test]
    fn keeps_single_sentence_summary_whole() {
        let sentences =
            split_summary_sentences("The fox jumps over the fence.").expect("sentences");
        assert_eq!(sentences, vec!["The fox jumps over the fence.".to_string()]);
    }

    #[test]
    fn rejects_summary_without_sentences() {
        let error = split_summary_sentences("   ").unwrap_err();
        assert!(matches!(error, SegmentError::NoSentences));
    }

    #[test]
    fn paragraphs_drop_blank_lines() {
        let paragraphs = split_paragraphs("line one\n\nline two\n");
        assert_eq!(
            paragraphs,
            vec!["line one".to_string(), "line two".to_string()]
        );
    }

    #[test]
    fn all_blank_document_yields_no_paragraphs() {
        assert!(split_paragraphs("\n\n\n").is_empty());
    }
}
