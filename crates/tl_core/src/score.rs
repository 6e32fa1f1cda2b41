//! Set-score string codec.
//!
//! Scores travel as plain strings like `"6-4 0-6 7-6"`: space-separated set
//! tokens, each `<home>-<away>`. Saving a malformed score is allowed (the
//! store is lenient), but a score that does not parse contributes zero games
//! to either side when standings are aggregated.

/// One set, home games first.
pub type SetScore = (u32, u32);

/// Parses `"6-4 0-6 7-6"` into `[(6,4), (0,6), (7,6)]`.
///
/// Returns `None` for any malformed token. A blank string is a valid empty
/// score (no sets played yet).
pub fn parse_score_string(score: &str) -> Option<Vec<SetScore>> {
    let trimmed = score.trim();
    if trimmed.is_empty() {
        return Some(Vec::new());
    }
    trimmed
        .split(' ')
        .map(|set| {
            let (home, away) = set.split_once('-')?;
            Some((home.parse().ok()?, away.parse().ok()?))
        })
        .collect()
}

/// Formats `[(6,4), (0,6)]` back into `"6-4 0-6"`.
pub fn score_array_to_string(sets: &[SetScore]) -> String {
    sets.iter()
        .map(|(home, away)| format!("{home}-{away}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Total games for each side, `(home, away)`.
///
/// Malformed or empty scores count as zero-zero rather than failing the
/// caller; the lenient save path means bad strings can reach us.
pub fn games_tally(score: &str) -> (u32, u32) {
    match parse_score_string(score) {
        Some(sets) => sets.iter().fold((0, 0), |(h, a), (sh, sa)| {
            // Parseable does not mean sane; huge tokens must not panic here.
            (h.saturating_add(*sh), a.saturating_add(*sa))
        }),
        None => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_multi_set_score() {
        assert_eq!(
            parse_score_string("6-4 0-6 7-6"),
            Some(vec![(6, 4), (0, 6), (7, 6)])
        );
    }

    #[test]
    fn blank_score_is_empty() {
        assert_eq!(parse_score_string(""), Some(vec![]));
        assert_eq!(parse_score_string("   "), Some(vec![]));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(parse_score_string("6-4 banana"), None);
        assert_eq!(parse_score_string("64"), None);
        assert_eq!(parse_score_string("6-"), None);
        assert_eq!(parse_score_string("6--4"), None);
    }

    #[test]
    fn formats_score_array() {
        assert_eq!(score_array_to_string(&[(6, 4), (0, 6)]), "6-4 0-6");
        assert_eq!(score_array_to_string(&[]), "");
    }

    #[test]
    fn games_tally_sums_both_sides() {
        assert_eq!(games_tally("6-4 0-6 7-6"), (13, 16));
    }

    #[test]
    fn games_tally_is_zero_for_bad_input() {
        assert_eq!(games_tally("not a score"), (0, 0));
        assert_eq!(games_tally(""), (0, 0));
    }

    #[test]
    fn games_tally_saturates_on_absurd_totals() {
        assert_eq!(
            games_tally("4294967295-1 4294967295-1"),
            (u32::MAX, 2)
        );
    }

    proptest! {
        // Round-trip: any well-formed score string survives parse + format.
        #[test]
        fn score_string_round_trips(sets in prop::collection::vec((0u32..20, 0u32..20), 1..6)) {
            let rendered = score_array_to_string(&sets);
            let parsed = parse_score_string(&rendered).unwrap();
            prop_assert_eq!(parsed, sets);
        }
    }
}
