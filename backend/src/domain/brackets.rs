//! Selection of the population bracket that applies to a municipality.
//!
//! Brackets are compared by their normalized range (see
//! [`PercentageBracket::lower_bound`]). Selection is by containment; ordering
//! only decides which bracket wins when a table has overlapping ranges.

use super::models::percentage_bracket::PercentageBracket;

/// Brackets ordered by normalized lower bound, keeping input order for ties.
pub fn sort_brackets(brackets: &[PercentageBracket]) -> Vec<&PercentageBracket> {
    let mut sorted: Vec<&PercentageBracket> = brackets.iter().collect();
    sorted.sort_by(|a, b| a.lower_bound().total_cmp(&b.lower_bound()));
    sorted
}

/// The bracket whose range contains `inhabitants`, or `None` when the table
/// has no such bracket.
pub fn resolve_bracket(
    inhabitants: u64,
    brackets: &[PercentageBracket],
) -> Option<&PercentageBracket> {
    sort_brackets(brackets)
        .into_iter()
        .find(|bracket| bracket.contains(inhabitants))
}

/// Every pair of brackets whose ranges intersect, in sorted order.
pub fn find_overlaps(brackets: &[PercentageBracket]) -> Vec<(&PercentageBracket, &PercentageBracket)> {
    let sorted = sort_brackets(brackets);
    let mut overlaps = Vec::new();
    for (i, first) in sorted.iter().enumerate() {
        for second in &sorted[i + 1..] {
            if first.overlaps(second) {
                overlaps.push((*first, *second));
            }
        }
    }
    overlaps
}
