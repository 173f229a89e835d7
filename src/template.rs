//! Post text generation: placeholder substitution, excerpts and the
//! platform length limit.

use regex::{Captures, Regex};
use std::sync::OnceLock;

pub const DEFAULT_FORMAT: &str = "{title}\n\n{url}";

/// Maximum post length in characters.
pub const MAX_POST_CHARS: usize = 280;
pub const EXCERPT_WORDS: usize = 20;

const ELLIPSIS: &str = "...";
const EXCERPT_MORE: &str = "\u{2026}";

/// Values substituted for `{title}`, `{url}` and `{excerpt}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    pub title: String,
    pub url: String,
    pub excerpt: String,
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{(title|url|excerpt)\}").expect("valid placeholder pattern"))
}

fn markup_patterns() -> &'static (Regex, Regex) {
    static PATTERNS: OnceLock<(Regex, Regex)> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        (
            Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
                .expect("valid script pattern"),
            Regex::new(r"(?s)<[^>]*>").expect("valid tag pattern"),
        )
    })
}

/// Substitute known placeholders in a single pass.
///
/// Substituted values are never re-scanned; unknown `{...}` sequences are
/// kept as they are.
pub fn render(format: &str, placeholders: &Placeholders) -> String {
    placeholder_pattern()
        .replace_all(format, |caps: &Captures| match &caps[1] {
            "title" => placeholders.title.clone(),
            "url" => placeholders.url.clone(),
            _ => placeholders.excerpt.clone(),
        })
        .into_owned()
}

/// Remove HTML tags, including the bodies of `<script>` and `<style>`.
pub fn strip_tags(content: &str) -> String {
    let (scripts, tags) = markup_patterns();
    let without_scripts = scripts.replace_all(content, "");
    tags.replace_all(&without_scripts, "").into_owned()
}

/// Plain-text excerpt of at most `words` words, `…` appended when trimmed.
pub fn excerpt(content: &str, words: usize) -> String {
    let text = strip_tags(content);
    let all = text.split_whitespace().collect::<Vec<&str>>();
    if all.len() > words {
        format!("{}{}", all[..words].join(" "), EXCERPT_MORE)
    } else {
        all.join(" ")
    }
}

/// Cut `text` to `limit` characters, ending in `...` when shortened.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit <= ELLIPSIS.len() {
        return text.chars().take(limit).collect();
    }
    let keep = limit - ELLIPSIS.len();
    let mut truncated = text.chars().take(keep).collect::<String>();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Render and clamp to [`MAX_POST_CHARS`].
pub fn compose(format: &str, placeholders: &Placeholders) -> String {
    truncate(&render(format, placeholders), MAX_POST_CHARS)
}
