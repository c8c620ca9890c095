//! Fuzzy screen lookup for the host command line.
//!
//! `go cand` should land on Candidates without typing the full identifier.
//! Queries are matched against each screen's title and kebab-case id with the
//! skim algorithm; the better of the two scores wins.

use crate::domain::ScreenId;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// One ranked palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenMatch {
    pub screen: ScreenId,
    pub score: i64,
    /// Character positions in the title that matched, for highlighting.
    pub title_indices: Vec<usize>,
}

/// Ranks all screens against `query`, best first.
///
/// An empty query returns every screen in declaration order with score 0.
#[must_use]
pub fn rank_screens(query: &str) -> Vec<ScreenMatch> {
    let query = query.trim().to_lowercase();
    let _span = tracing::debug_span!("rank_screens", query_len = query.len()).entered();

    if query.is_empty() {
        return ScreenId::ALL
            .iter()
            .map(|&screen| ScreenMatch {
                screen,
                score: 0,
                title_indices: vec![],
            })
            .collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut matches: Vec<ScreenMatch> = ScreenId::ALL
        .iter()
        .filter_map(|&screen| {
            let title = matcher.fuzzy_indices(&screen.title().to_lowercase(), &query);
            let id = matcher.fuzzy_match(screen.as_str(), &query);

            match (title, id) {
                (Some((title_score, indices)), id_score) => Some(ScreenMatch {
                    screen,
                    score: title_score.max(id_score.unwrap_or(i64::MIN)),
                    title_indices: indices,
                }),
                (None, Some(id_score)) => Some(ScreenMatch {
                    screen,
                    score: id_score,
                    title_indices: vec![],
                }),
                (None, None) => None,
            }
        })
        .collect();

    // Stable sort keeps declaration order among equal scores.
    matches.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::debug!(match_count = matches.len(), "screens ranked");
    matches
}

/// Resolves a query to a single screen.
///
/// An exact id wins outright; otherwise the best fuzzy match is used.
#[must_use]
pub fn resolve_screen(query: &str) -> Option<ScreenId> {
    if let Ok(screen) = query.trim().parse::<ScreenId>() {
        return Some(screen);
    }
    rank_screens(query).first().map(|m| m.screen)
}
