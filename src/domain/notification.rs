use std::sync::LazyLock;

use regex::Regex;

use crate::domain::commit::CommitRecord;

const DATE_FORMAT: &str = "%d/%m/%Y, %H:%M";

static FEAT_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^feat(?:\(([^)\n]*)\))?:\s*(.*)$").expect("invalid regex")
});

static CO_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^co-authored-by:[ \t]*([^<\r\n]*)").expect("invalid regex")
});

/// A commit message split into the parts a notification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatMessage {
    pub scope: Option<String>,
    pub summary: String,
    pub co_authors: Vec<String>,
}

impl FeatMessage {
    /// Never fails: a message without the feat prefix keeps its first line
    /// as the summary and gets no scope.
    pub fn parse(message: &str) -> Self {
        let (scope, rest) = match FEAT_MESSAGE.captures(message) {
            Some(caps) => (
                caps.get(1)
                    .map(|scope| scope.as_str().trim())
                    .filter(|scope| !scope.is_empty())
                    .map(str::to_string),
                caps.get(2).map_or("", |rest| rest.as_str()),
            ),
            None => (None, message),
        };

        let summary = rest.lines().next().unwrap_or_default().trim().to_string();

        let co_authors = CO_AUTHOR
            .captures_iter(message)
            .filter_map(|caps| caps.get(1))
            .map(|name| name.as_str().trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            scope,
            summary,
            co_authors,
        }
    }

    /// Summary text with the scope prepended, e.g. `api: add foo`.
    pub fn headline(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{scope}: {}", self.summary),
            None => self.summary.clone(),
        }
    }
}

/// Joins the author and co-authors as `A, B and C`.
pub fn byline(author: &str, co_authors: &[String]) -> String {
    let mut by = author.to_string();
    for (index, name) in co_authors.iter().enumerate() {
        if index + 1 == co_authors.len() {
            by.push_str(" and ");
        } else {
            by.push_str(", ");
        }
        by.push_str(name);
    }
    by
}

/// Renders one commit as a markdown link followed by its attribution line.
pub fn render_commit(commit: &CommitRecord) -> String {
    let parsed = FeatMessage::parse(&commit.message);
    format!(
        "[{}]({})\nby {}, at {}\n",
        parsed.headline(),
        commit.permalink,
        byline(&commit.author_name, &parsed.co_authors),
        commit.author_date.format(DATE_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn commit(message: &str, author: &str) -> CommitRecord {
        CommitRecord {
            id: "abc123".to_string(),
            message: message.to_string(),
            author_name: author.to_string(),
            author_date: Utc.with_ymd_and_hms(2024, 3, 7, 18, 5, 0).unwrap(),
            permalink: "https://github.com/octo/plum/commit/abc123".to_string(),
        }
    }

    #[test]
    fn parses_scope_summary_and_co_author() {
        let parsed =
            FeatMessage::parse("feat(api): add foo\n\nco-authored-by: Jane Doe <j@x.com>");
        assert_eq!(parsed.scope.as_deref(), Some("api"));
        assert_eq!(parsed.summary, "add foo");
        assert_eq!(parsed.co_authors, vec!["Jane Doe".to_string()]);
        assert_eq!(parsed.headline(), "api: add foo");
        assert_eq!(byline("Al", &parsed.co_authors), "Al and Jane Doe");
    }

    #[test]
    fn summary_stops_at_first_line_break() {
        let parsed = FeatMessage::parse("FEAT: ship it\nsecond line\n\nbody text");
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.summary, "ship it");
    }

    #[test]
    fn collects_several_co_authors_and_skips_blanks() {
        let message = "feat: pair work\n\n\
                       Co-Authored-By: Bo <bo@x.com>\n\
                       co-authored-by:    \n\
                       CO-AUTHORED-BY:  Cy  <cy@x.com>";
        let parsed = FeatMessage::parse(message);
        assert_eq!(parsed.co_authors, vec!["Bo".to_string(), "Cy".to_string()]);
        assert_eq!(byline("Al", &parsed.co_authors), "Al, Bo and Cy");
    }

    #[test]
    fn byline_without_co_authors_is_author_alone() {
        assert_eq!(byline("Al", &[]), "Al");
    }

    #[test]
    fn malformed_message_degrades_to_plain_summary() {
        let parsed = FeatMessage::parse("just some text\nmore");
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.summary, "just some text");
        assert!(parsed.co_authors.is_empty());
    }

    #[test]
    fn summary_skips_line_break_after_colon() {
        let parsed = FeatMessage::parse("feat(api):\nadd foo\n\nbody");
        assert_eq!(parsed.summary, "add foo");
        assert_eq!(parsed.headline(), "api: add foo");
    }

    #[test]
    fn empty_scope_is_dropped() {
        let parsed = FeatMessage::parse("feat(): nothing scoped");
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.headline(), "nothing scoped");
    }

    #[test]
    fn renders_link_byline_and_date() {
        let rendered = render_commit(&commit(
            "feat(api): add foo\n\nco-authored-by: Jane Doe <j@x.com>",
            "Al",
        ));
        assert_eq!(
            rendered,
            "[api: add foo](https://github.com/octo/plum/commit/abc123)\n\
             by Al and Jane Doe, at 07/03/2024, 18:05\n"
        );
    }

    #[test]
    fn renders_without_scope_or_co_authors() {
        let rendered = render_commit(&commit("feat: dark mode", "Al"));
        assert!(rendered.starts_with("[dark mode]("));
        assert!(rendered.contains("\nby Al, at "));
    }
}
