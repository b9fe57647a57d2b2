//! Text normalization, escaping and wrapping for LaTeX output.

use std::sync::LazyLock;

use regex::Regex;
use textwrap::{dedent, fill, Options, WordSplitter};
use unicode_normalization::UnicodeNormalization;

/// Width that narrative paragraphs are wrapped to in the generated source.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Runs of horizontal whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid regex"));

/// Normalize user-supplied text before it is escaped.
///
/// Composes Unicode to NFC (pdfLaTeX's `inputenc` only knows precomposed
/// characters), drops control characters and collapses runs of spaces.
pub fn normalize_text(text: &str) -> String {
    let composed: String = text
        .nfc()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect();
    HORIZONTAL_SPACE
        .replace_all(composed.trim(), " ")
        .into_owned()
}

/// Escape text so LaTeX typesets it literally.
///
/// # Examples
/// ```
/// use github_summary::latex::escape;
///
/// assert_eq!(escape("50% of C#"), r"50\% of C\#");
/// ```
pub fn escape(text: &str) -> String {
    let normalized = normalize_text(text);
    let mut out = String::with_capacity(normalized.len());
    for c in normalized.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '<' => out.push_str(r"\textless{}"),
            '>' => out.push_str(r"\textgreater{}"),
            '\n' => out.push_str("\\\\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Dedent a narrative snippet and wrap each paragraph.
///
/// Paragraphs are separated by blank lines; single line breaks inside a
/// paragraph are joined. Words are never split, since a line break inside
/// a command or URL would change its meaning.
pub fn wrap_paragraphs(text: &str) -> String {
    let options = Options::new(TEXT_WRAP_WIDTH)
        .break_words(false)
        .word_splitter(WordSplitter::NoHyphenation);
    dedent(text)
        .trim()
        .split("\n\n")
        .map(|paragraph| {
            let joined = paragraph
                .lines()
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(" ");
            fill(&joined, &options)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
