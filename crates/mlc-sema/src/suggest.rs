//! Levenshtein-based "did you mean" suggestions for undeclared identifiers
//! (spec.md §4.3's Identifier rule).

/// Edit distance between two strings (classic DP table).
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for i in 1..=a.len() {
        let mut prev_diag = row[0];
        row[0] = i;
        for j in 1..=b.len() {
            let temp = row[j];
            row[j] = if a[i - 1] == b[j - 1] {
                prev_diag
            } else {
                1 + prev_diag.min(row[j]).min(row[j - 1])
            };
            prev_diag = temp;
        }
    }
    row[b.len()]
}

/// Picks up to `limit` candidates within `max_distance` of `target`,
/// filtered so a lowercase-starting target only suggests lowercase-starting
/// candidates and vice versa (spec.md §4.3: "case-sensitive starter-char
/// filter value vs type"), sorted by distance then alphabetically.
#[must_use]
pub fn suggest<'a>(target: &str, candidates: impl Iterator<Item = &'a str>, max_distance: u8, limit: usize) -> Vec<String> {
    let target_is_upper = target.chars().next().is_some_and(char::is_uppercase);
    let mut scored: Vec<(usize, &str)> = candidates
        .filter(|c| c.chars().next().is_some_and(char::is_uppercase) == target_is_upper)
        .map(|c| (levenshtein(target, c), c))
        .filter(|(dist, _)| *dist <= max_distance as usize && *dist > 0)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored.into_iter().take(limit).map(|(_, c)| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_excluded() {
        assert!(suggest("foo", ["foo"].into_iter(), 2, 3).is_empty());
    }

    #[test]
    fn close_typo_is_suggested() {
        let result = suggest("retrun", ["return", "somethingElse"].into_iter(), 2, 3);
        assert_eq!(result, vec!["return".to_string()]);
    }

    #[test]
    fn case_class_mismatch_is_filtered() {
        // "intt" (value-looking) should not suggest "Int" (a type).
        assert!(suggest("intt", ["Int"].into_iter(), 2, 3).is_empty());
    }
}
