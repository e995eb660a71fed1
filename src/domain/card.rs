use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AppError, AppResult};

lazy_static! {
    static ref CARD_PATH: Regex = Regex::new(r"^https?://[^/]+/c/([^/]+)(?:/|$)").unwrap();
    static ref NAME_WITH_POINTS: Regex = Regex::new(r"^\(\d+\)\s*(.*)$").unwrap();
}

/// A Trello card as fetched from the board: mutated at most once per run,
/// when the filed bug's URL is written back into the description.
#[derive(Debug, Clone)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub description: String,
    pub short_url: String,
}

/// Resolve the positional CLI argument into a card short ID. Anything with a
/// slash is treated as a card URL and must carry the `/c/<id>` path shape.
pub fn card_id_from_input(input: &str) -> AppResult<String> {
    if !input.contains('/') {
        return Ok(input.to_string());
    }

    CARD_PATH
        .captures(input)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| {
            AppError::Configuration(format!("\"{input}\" does not contain a valid card path"))
        })
}

/// Strip a conventional leading "(N)" story-point annotation from a card
/// name. Names without the prefix pass through verbatim.
pub fn summary_from_card_name(name: &str) -> String {
    match NAME_WITH_POINTS.captures(name) {
        Some(captures) => captures[1].to_string(),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_story_point_prefix() {
        assert_eq!(summary_from_card_name("(3) Fix login crash"), "Fix login crash");
        assert_eq!(summary_from_card_name("(12)Tight prefix"), "Tight prefix");
    }

    #[test]
    fn leaves_plain_names_alone() {
        assert_eq!(summary_from_card_name("Fix login crash"), "Fix login crash");
        assert_eq!(summary_from_card_name("(beta) Not points"), "(beta) Not points");
        assert_eq!(summary_from_card_name(""), "");
    }

    #[test]
    fn prefix_must_lead_the_name() {
        assert_eq!(summary_from_card_name("Fix (3) crash"), "Fix (3) crash");
    }

    #[test]
    fn raw_id_passes_through() {
        assert_eq!(card_id_from_input("AbC123").unwrap(), "AbC123");
    }

    #[test]
    fn extracts_id_from_card_url() {
        let id = card_id_from_input("https://trello.com/c/AbC123/4-fix-login").unwrap();
        assert_eq!(id, "AbC123");
    }

    #[test]
    fn extracts_id_without_slug() {
        let id = card_id_from_input("https://trello.com/c/AbC123").unwrap();
        assert_eq!(id, "AbC123");
    }

    #[test]
    fn rejects_urls_without_card_path() {
        let result = card_id_from_input("https://trello.com/b/xyz/some-board");
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
