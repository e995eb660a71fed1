/// Ephemeral input for a bug-creation request, built from a card and
/// discarded once the tracker has answered.
#[derive(Debug, Clone)]
pub struct BugDraft {
    pub summary: String,
    pub description: String,
    pub card_url: String,
}

/// A bug the tracker accepted, with its URL derived from the tracker base.
#[derive(Debug, Clone)]
pub struct FiledBug {
    pub id: u64,
    pub url: String,
    pub summary: String,
}

pub fn bug_url(base_url: &str, id: u64) -> String {
    format!("{}/show_bug.cgi?id={id}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_bug_url_from_base() {
        assert_eq!(
            bug_url("https://bugzilla.example.org/", 42),
            "https://bugzilla.example.org/show_bug.cgi?id=42"
        );
        assert_eq!(
            bug_url("https://bugzilla.example.org", 42),
            "https://bugzilla.example.org/show_bug.cgi?id=42"
        );
    }
}
