//! Comparison form of query and candidate text.
//!
//! Candidates are always lowercased. Queries are lowercased only when
//! whitespace is being stripped, so with `include_whitespace = true` the
//! query stays case sensitive against lowercase candidates. Existing
//! callers depend on that, keep it.
//!
//! Stripping removes only the ASCII whitespace set (space, tab, line feed,
//! vertical tab, form feed, carriage return). Non-breaking and other Unicode
//! spaces are ordinary characters.

/// Which side of a comparison a string is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Query,
    Candidate,
}

/// Whitespace removed when stripping
pub fn is_strippable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

pub fn normalize(text: &str, role: TextRole, include_whitespace: bool) -> String {
    let stripped: String = if include_whitespace {
        text.to_string()
    } else {
        text.chars().filter(|&c| !is_strippable(c)).collect()
    };

    match role {
        TextRole::Candidate => stripped.to_lowercase(),
        TextRole::Query if !include_whitespace => stripped.to_lowercase(),
        TextRole::Query => stripped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_all_whitespace_runs() {
        assert_eq!(
            normalize("  Orange \t Winter\n\nScarf ", TextRole::Candidate, false),
            "orangewinterscarf"
        );
        assert_eq!(normalize("Red  Car", TextRole::Query, false), "redcar");
    }

    #[test]
    fn test_keeps_whitespace_when_included() {
        assert_eq!(normalize("Red  Car", TextRole::Candidate, true), "red  car");
    }

    #[test]
    fn test_query_case_follows_whitespace_flag() {
        assert_eq!(normalize("Winter", TextRole::Query, false), "winter");
        assert_eq!(normalize("Winter", TextRole::Query, true), "Winter");
        assert_eq!(normalize("Winter", TextRole::Candidate, true), "winter");
    }

    #[test]
    fn test_no_other_transformations() {
        assert_eq!(normalize("Café-Boombox!", TextRole::Candidate, false), "café-boombox!");
        assert_eq!(normalize("", TextRole::Query, false), "");
        assert_eq!(normalize(" \t ", TextRole::Query, false), "");
    }

    #[test]
    fn test_strips_vertical_tab_and_form_feed() {
        assert_eq!(normalize("a\u{0B}b\u{0C}c\r\n", TextRole::Candidate, false), "abc");
    }

    #[test]
    fn test_keeps_unicode_spaces() {
        assert_eq!(
            normalize("Red\u{A0}Car\u{2003}X", TextRole::Candidate, false),
            "red\u{a0}car\u{2003}x"
        );
        assert!(!is_strippable('\u{A0}'));
        assert!(!is_strippable('\u{2003}'));
        assert!(!is_strippable('\u{3000}'));
    }
}
