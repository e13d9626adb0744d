use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

static FEAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^feat(\([^)\n]*\))?:").expect("invalid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: String,
    pub message: String,
    pub author_name: String,
    pub author_date: DateTime<Utc>,
    pub permalink: String,
}

impl CommitRecord {
    pub fn is_feat(&self) -> bool {
        is_feat_message(&self.message)
    }
}

/// True when `message` opens with `feat:` or `feat(scope):`, ignoring case.
pub fn is_feat_message(message: &str) -> bool {
    FEAT_PREFIX.is_match(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_feat_prefixes() {
        assert!(is_feat_message("feat: add login"));
        assert!(is_feat_message("feat(api): add foo"));
        assert!(is_feat_message("FEAT(ui): dark mode"));
        assert!(is_feat_message("Feat: capitalised"));
        assert!(is_feat_message("feat(): empty scope"));
    }

    #[test]
    fn rejects_other_messages() {
        assert!(!is_feat_message("fix: crash on start"));
        assert!(!is_feat_message("feature: not conventional"));
        assert!(!is_feat_message("feat add missing colon"));
        assert!(!is_feat_message(" feat: leading space"));
        assert!(!is_feat_message("chore: bump\n\nfeat: hidden in body"));
        assert!(!is_feat_message("feat(api\n): split scope"));
        assert!(!is_feat_message("feat(a(b)): nested scope"));
        assert!(!is_feat_message(""));
    }
}
