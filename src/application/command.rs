//! Free-text input parsing for the category picker.

/// One user request while browsing categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    Descend(String),
    Select(String),
    Back,
}

const SELECT_KEYWORD: &str = "select";

impl NavCommand {
    /// Parse a line typed by the user.
    ///
    /// - exactly `back_keyword` -> `Back`
    /// - starts with `select` (any case) -> `Select` of the text after the first space
    /// - anything else -> `Descend` of the whole line
    ///
    /// Titles are kept verbatim and matched case-sensitively later.
    pub fn parse(input: &str, back_keyword: &str) -> Self {
        let input = input.trim_end_matches(['\r', '\n']);
        if input == back_keyword {
            return Self::Back;
        }

        let head: String = input.chars().take(SELECT_KEYWORD.len()).collect();
        if head.to_lowercase() == SELECT_KEYWORD {
            let title = input.split_once(' ').map(|(_, rest)| rest).unwrap_or("");
            return Self::Select(title.to_string());
        }

        Self::Descend(input.to_string())
    }
}
