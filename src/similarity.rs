use std::collections::HashMap;

/// Sequence-similarity ratio as used by classic diff tools: 2*M/T, where M is
/// the total length of matching blocks found by recursive longest-common-block
/// expansion over Unicode scalar values and T is the combined length of both
/// strings. Two empty strings are fully similar.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_total(&a, &b) as f64 / total as f64
}

/// Score a title against a query: the best ratio over the full title and each
/// of its whitespace-separated words. The word pass lets a misspelling of one
/// word clear the cutoff even when the full title dilutes the ratio.
pub fn title_score(title: &str, query: &str) -> f64 {
    title
        .split_whitespace()
        .map(|word| ratio(word, query))
        .fold(ratio(title, query), f64::max)
}

fn matching_total(a: &[char], b: &[char]) -> usize {
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b_index.entry(ch).or_default().push(j);
    }

    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b_index, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        pending.push((alo, i, blo, j));
        pending.push((i + size, ahi, j + size, bhi));
    }
    total
}

/// Earliest-longest matching block of a[alo..ahi] within b[blo..bhi].
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run_lengths[j] = length of the matching run ending at (i, j)
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();
    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_runs = HashMap::new();
        if let Some(positions) = b_index.get(ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let run = 1 + j
                    .checked_sub(1)
                    .and_then(|prev| run_lengths.get(&prev))
                    .copied()
                    .unwrap_or(0);
                next_runs.insert(j, run);
                if run > best_size {
                    best_i = i + 1 - run;
                    best_j = j + 1 - run;
                    best_size = run;
                }
            }
        }
        run_lengths = next_runs;
    }
    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "got {actual}, expected {expected}"
        );
    }

    #[test]
    fn identical_and_disjoint_strings() {
        assert_close(ratio("Pulp Fiction", "Pulp Fiction"), 1.0);
        assert_close(ratio("abc", "xyz"), 0.0);
        assert_close(ratio("", ""), 1.0);
        assert_close(ratio("abc", ""), 0.0);
    }

    #[test]
    fn counts_all_matching_blocks() {
        // blocks: "bcd" -> M = 3, T = 8
        assert_close(ratio("abcd", "bcde"), 0.75);
        // blocks: "Sh" + "wshank" -> M = 8, T = 17
        assert_close(ratio("Shawshank", "Shwshank"), 16.0 / 17.0);
        // same M against the full title, diluted by its length: T = 32
        assert_close(ratio("The Shawshank Redemption", "Shwshank"), 0.5);
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_close(ratio("ABC", "abc"), 0.0);
    }

    #[test]
    fn title_score_takes_best_word() {
        assert_close(
            title_score("The Shawshank Redemption", "Shwshank"),
            16.0 / 17.0,
        );
        // single word, no whitespace split to help
        assert_close(title_score("Heat", "Heat"), 1.0);
    }
}
