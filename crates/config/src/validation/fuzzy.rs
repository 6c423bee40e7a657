//! Fuzzy key matching for "Did you mean ...?" suggestions.

/// The candidate closest to `input`, ignoring case.
///
/// Nothing is suggested when even the closest candidate needs edits on
/// more than half of the longer name's characters.
pub(crate) fn fuzzy_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let input = input.to_lowercase();
    let (closest, distance) = candidates
        .iter()
        .map(|&c| (c, levenshtein(&input, &c.to_lowercase())))
        .min_by_key(|&(_, distance)| distance)?;

    let longest = input.chars().count().max(closest.chars().count());
    (distance <= longest / 2).then_some(closest)
}

/// Levenshtein edit distance between two strings.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let n = b.len();

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
