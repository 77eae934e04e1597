/// Safely convert usize to f64 for ratio calculations
///
/// Name lengths are far below the range where f64 loses integer precision.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Normalize a name or code for comparison: trim surrounding whitespace and lower-case
#[must_use]
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Levenshtein edit distance between two strings, counted in `char`s.
///
/// Builds the full `(len(a)+1) x (len(b)+1)` matrix where cell `[i][j]` holds
/// the number of insertions, deletions or substitutions needed to turn the
/// first `i` chars of `a` into the first `j` chars of `b`.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            matrix[i][j] = if a[i - 1] == b[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                1 + matrix[i][j - 1]
                    .min(matrix[i - 1][j])
                    .min(matrix[i - 1][j - 1])
            };
        }
    }

    matrix[a.len()][b.len()]
}

/// Similarity of two names in `[0.0, 1.0]`: `1 - distance / max_len`.
///
/// Both inputs are normalized first. Identical normalized strings (including
/// two empty ones) score exactly 1.0 without computing the edit distance.
///
/// # Examples
///
/// ```
/// use catalog_dedup::matching::scoring::compute_similarity;
///
/// assert_eq!(compute_similarity("Flour", " flour "), 1.0);
/// assert!((compute_similarity("kitten", "sitting") - 4.0 / 7.0).abs() < 1e-9);
/// assert_eq!(compute_similarity("", "abc"), 0.0);
/// ```
#[must_use]
pub fn compute_similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(&a, &b);
    1.0 - count_to_f64(distance) / count_to_f64(max_len)
}
