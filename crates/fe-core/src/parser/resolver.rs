//! Item name resolution with fuzzy matching.

use strsim::jaro_winkler;

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Resolve a typed item name against the inventory.
///
/// Exact (case-insensitive) matches win; otherwise the closest item scoring
/// at least the fuzzy threshold is returned.
pub fn resolve_item<'a>(inventory: &'a [String], input: &str) -> Option<&'a str> {
    let input_lower = input.trim().to_lowercase();

    if let Some(item) = inventory.iter().find(|i| i.to_lowercase() == input_lower) {
        return Some(item);
    }

    inventory
        .iter()
        .map(|item| (item, jaro_winkler(&input_lower, &item.to_lowercase())))
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(item, _)| item.as_str())
}
