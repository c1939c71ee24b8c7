//! Ordinal labels (`1st`, `2nd`, ...) for list positions.
//!
//! Labels are derived from the current position in a list, so removing
//! an item shifts the labels of everything after it.

use bdsoil_types::Land;

/// English ordinal for a 1-based position.
pub fn ordinal(position: usize) -> String {
    let suffix = match (position % 10, position % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{position}{suffix}")
}

/// Pair each land with its ordinal label in list order.
pub fn label_lands(lands: &[Land]) -> impl Iterator<Item = (String, &Land)> {
    lands
        .iter()
        .enumerate()
        .map(|(index, land)| (ordinal(index.saturating_add(1)), land))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes() {
        let labels: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 101, 111, 112]
            .into_iter()
            .map(ordinal)
            .collect();
        assert_eq!(
            labels,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd", "101st", "111th", "112th"]
        );
    }
}
