use regex::Regex;
use std::sync::LazyLock;

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```[A-Za-z0-9_+-]*[ \t]*\r?\n?").unwrap());

static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?[ \t]*```\s*$").unwrap());

/// Removes a leading and trailing triple-backtick fence, with or without a
/// language tag, and trims what is left.
pub fn strip_markdown_fences(text: &str) -> String {
    let without_opening = OPENING_FENCE.replace(text, "");
    let without_closing = CLOSING_FENCE.replace(&without_opening, "");

    without_closing.trim().to_string()
}

/// Splits free text on line breaks, trims every line and drops the blank ones.
/// Source order is preserved.
pub fn normalize_tasks(raw_tasks: &str) -> Vec<String> {
    raw_tasks
        .lines()
        .map(str::trim)
        .filter(|task| !task.is_empty())
        .map(str::to_string)
        .collect()
}
