//! Tag-overlap matching used by community, mentor and learning-resource
//! recommendations.

/// Result cap for community recommendations.
pub const COMMUNITY_RESULT_CAP: usize = 10;
/// Result cap for mentor matches.
pub const MENTOR_RESULT_CAP: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Match<T> {
    pub item: T,
    pub score: usize,
}

/// Number of shared entries between two tag sets (exact string match).
pub fn overlap_count(source: &[String], candidate: &[String]) -> usize {
    source.iter().filter(|tag| candidate.contains(tag)).count()
}

/// The shared entries themselves, in source order.
pub fn matched_tags(source: &[String], candidate: &[String]) -> Vec<String> {
    source
        .iter()
        .filter(|tag| candidate.contains(tag))
        .cloned()
        .collect()
}

/// Ranks candidates by tag overlap with `source_tags`.
///
/// Zero-overlap candidates are dropped; equal scores keep retrieval order
/// (stable sort); the result is truncated to `cap`. Callers handle the
/// empty-source fallback themselves since "popularity" differs per domain.
pub fn rank_by_overlap<T>(
    source_tags: &[String],
    candidates: impl IntoIterator<Item = (T, Vec<String>)>,
    cap: usize,
) -> Vec<Match<T>> {
    let mut scored: Vec<Match<T>> = candidates
        .into_iter()
        .filter_map(|(item, tags)| {
            let score = overlap_count(source_tags, &tags);
            (score > 0).then_some(Match { item, score })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(cap);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn counts_exact_overlap() {
        let source = tags(&["rust", "web", "ml"]);
        assert_eq!(overlap_count(&source, &tags(&["ml", "rust", "go"])), 2);
        assert_eq!(overlap_count(&source, &tags(&["java"])), 0);
    }

    #[test]
    fn matched_tags_preserve_source_order() {
        let source = tags(&["rust", "web", "ml"]);
        assert_eq!(
            matched_tags(&source, &tags(&["ml", "rust"])),
            tags(&["rust", "ml"])
        );
    }

    #[test]
    fn ranks_descending_and_drops_zero_overlap() {
        let source = tags(&["rust", "web", "ml"]);
        let candidates = vec![
            ("weak", tags(&["web"])),
            ("none", tags(&["cooking"])),
            ("strong", tags(&["rust", "web", "ml"])),
        ];

        let ranked = rank_by_overlap(&source, candidates, 10);
        let names: Vec<&str> = ranked.iter().map(|m| m.item).collect();
        assert_eq!(names, vec!["strong", "weak"]);
        assert_eq!(ranked[0].score, 3);
    }

    #[test]
    fn equal_scores_keep_retrieval_order() {
        let source = tags(&["rust", "web"]);
        let candidates = vec![
            ("first", tags(&["rust"])),
            ("second", tags(&["web"])),
            ("third", tags(&["rust"])),
        ];

        let ranked = rank_by_overlap(&source, candidates, 10);
        let names: Vec<&str> = ranked.iter().map(|m| m.item).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn truncates_to_cap() {
        let source = tags(&["rust"]);
        let candidates: Vec<(usize, Vec<String>)> =
            (0..20).map(|i| (i, tags(&["rust"]))).collect();

        let ranked = rank_by_overlap(&source, candidates, MENTOR_RESULT_CAP);
        assert_eq!(ranked.len(), 5);
        // Stable: the first five retrieved survive the cut.
        assert_eq!(ranked[0].item, 0);
        assert_eq!(ranked[4].item, 4);
    }

    #[test]
    fn empty_source_matches_nothing() {
        let candidates = vec![("a", tags(&["rust"]))];
        assert!(rank_by_overlap(&[], candidates, 10).is_empty());
    }
}
