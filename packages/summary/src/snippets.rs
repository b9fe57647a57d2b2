//! Narrative text blocks of the report.
//!
//! Arguments are inserted verbatim; callers pass already escaped values.

use crate::latex::wrap_paragraphs;

/// Opening letter of the Introduction chapter.
///
/// The profile link becomes a footnote when `url` is given.
pub fn intro(user: &str, start: &str, end: &str, url: Option<&str>) -> String {
    let footnote = url.map(|u| format!("\\footnote{{\\url{{{u}}}}}")).unwrap_or_default();
    wrap_paragraphs(&format!(
        "Dear reader.

        This paper is a summary of the GitHub activity of {user}{footnote} between {start} and {end}.
        This may include repo and gist creation, updates and code changes.
        Please be aware that the paper is generated automatically, so it is not one hundred percent reliable.
        I hope the paper will give you a nice overview of the projects and code written by {user}.
        Feel free to write suggestions on improvements!

        Have a nice read."
    ))
}

/// Project count sentence of the Projects chapter.
pub fn projects(user: &str, start: &str, end: &str, count: u64) -> String {
    format!("{user} created or contributed to {count} projects between {start} and {end}.")
}
