//! Similarity helpers for aligning summary sentences with source paragraphs.
//!
//! Provider embeddings are unit length, so a plain dot product is the cosine
//! similarity. Scores are rescaled onto the unit interval before display to
//! make them comparable across sentences.

/// Score each candidate embedding against the query embedding by dot product.
pub fn similarity_scores(query: &[f32], candidates: &[Vec<f32>]) -> Vec<f32> {
    candidates
        .iter()
        .map(|candidate| dot(query, candidate))
        .collect()
}

fn dot(left: &[f32], right: &[f32]) -> f32 {
    left.iter().zip(right).map(|(l, r)| l * r).sum()
}

/// Rescale scores linearly so the minimum maps to 0 and the maximum to 1.
///
/// A constant score list has no spread to stretch and rescales to all zeros.
pub fn rescale_unit_interval(scores: &[f32]) -> Vec<f32> {
    let Some(min) = scores.iter().copied().reduce(f32::min) else {
        return Vec::new();
    };
    let max = scores.iter().copied().fold(min, f32::max);
    let spread = max - min;
    if spread == 0.0 {
        return vec![0.0; scores.len()];
    }
    scores.iter().map(|score| (score - min) / spread).collect()
}
