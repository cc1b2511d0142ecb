//! Static text-similarity scoring.
//!
//! Similarity is the matching-token ratio `2 * LCS / (len_a + len_b)` over
//! lowercase word tokens, so it ranges from 0 (nothing shared) to 1
//! (identical token sequences).

pub(crate) fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn lcs_len(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Token-sequence similarity in `[0, 1]`. Two empty texts are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let (a, b) = (tokens(a), tokens(b));
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * lcs_len(&a, &b) as f64 / total as f64
}

/// How far `generated` departs from `reference`
pub fn novelty(generated: &str, reference: &str) -> f64 {
    1.0 - similarity_ratio(generated, reference)
}

/// Mean pairwise distance across samples; 0 for fewer than two
pub fn diversity<S: AsRef<str>>(samples: &[S]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, a) in samples.iter().enumerate() {
        for b in &samples[i + 1..] {
            total += 1.0 - similarity_ratio(a.as_ref(), b.as_ref());
            pairs += 1;
        }
    }
    total / pairs as f64
}
