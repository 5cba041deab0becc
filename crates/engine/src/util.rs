//! String-distance primitives backing payee similarity.

use std::collections::BTreeSet;

/// Levenshtein edit distance using the two-row O(min(m,n)) space algorithm.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Keep the shorter string in the inner loop to minimise allocation.
    let (a, b, m, n) = if m <= n { (a, b, m, n) } else { (b, a, n, m) };

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Plain similarity ratio in [0.0, 1.0]: 1 − distance / max_len.
pub fn ratio(s1: &str, s2: &str) -> f32 {
    if s1 == s2 {
        return 1.0;
    }
    let max_len = s1.chars().count().max(s2.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein_distance(s1, s2) as f32 / max_len as f32)
}

/// Best `ratio` of the shorter string against every same-length window
/// of the longer one. Catches substrings, e.g. "AMAZON" in
/// "AMAZON MARKETPLACE PMTS".
pub fn partial_ratio(s1: &str, s2: &str) -> f32 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 1.0 } else { 0.0 };
    }
    if short.len() == long.len() {
        let short: String = short.iter().collect();
        let long: String = long.iter().collect();
        return ratio(&short, &long);
    }

    let width = short.len();
    let short: String = short.iter().collect();
    let mut best: f32 = 0.0;
    for window in long.windows(width) {
        let window: String = window.iter().collect();
        best = best.max(ratio(&short, &window));
        if best == 1.0 {
            break;
        }
    }
    best
}

/// Lowercase alphanumeric words of a string, in order of appearance.
fn tokens(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// `ratio` over the sorted token lists, insensitive to word order.
pub fn token_sort_ratio(s1: &str, s2: &str) -> f32 {
    let mut t1 = tokens(s1);
    let mut t2 = tokens(s2);
    t1.sort();
    t2.sort();
    ratio(&t1.join(" "), &t2.join(" "))
}

/// Set-based token ratio: scores the shared token core against each
/// side's extras, so one side having additional words barely hurts.
pub fn token_set_ratio(s1: &str, s2: &str) -> f32 {
    let set1: BTreeSet<String> = tokens(s1).into_iter().collect();
    let set2: BTreeSet<String> = tokens(s2).into_iter().collect();

    let common: Vec<String> = set1.intersection(&set2).cloned().collect();
    let only1: Vec<String> = set1.difference(&set2).cloned().collect();
    let only2: Vec<String> = set2.difference(&set1).cloned().collect();

    let base = common.join(" ");
    let combined1 = join_nonempty(&base, &only1.join(" "));
    let combined2 = join_nonempty(&base, &only2.join(" "));

    ratio(&base, &combined1)
        .max(ratio(&base, &combined2))
        .max(ratio(&combined1, &combined2))
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{a} {b}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_zero() {
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn empty_string_is_length_of_other() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
    }

    #[test]
    fn single_edit_operations() {
        assert_eq!(levenshtein_distance("cat", "bat"), 1);
        assert_eq!(levenshtein_distance("abc", "abcd"), 1);
        assert_eq!(levenshtein_distance("abcd", "abc"), 1);
    }

    #[test]
    fn commutative() {
        assert_eq!(
            levenshtein_distance("amazon", "amzn"),
            levenshtein_distance("amzn", "amazon")
        );
    }

    #[test]
    fn ratio_bounds() {
        assert_eq!(ratio("amazon", "amazon"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
        assert!(ratio("amazon", "starbucks") < 0.5);
    }

    #[test]
    fn partial_ratio_finds_substring() {
        assert_eq!(partial_ratio("amazon", "amazon marketplace pmts"), 1.0);
        assert_eq!(partial_ratio("", ""), 1.0);
        assert_eq!(partial_ratio("", "abc"), 0.0);
    }

    #[test]
    fn token_sort_ignores_word_order() {
        assert_eq!(token_sort_ratio("coffee starbucks", "starbucks coffee"), 1.0);
    }

    #[test]
    fn token_set_tolerates_extra_words() {
        let score = token_set_ratio("STARBUCKS #123", "STARBUCKS COFFEE 123");
        assert_eq!(score, 1.0);
    }
}
