//! Front matter splitting and Markdown rendering.

use pulldown_cmark::{Options, Parser, html};
use regex::Regex;
use std::sync::LazyLock;

static FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)").unwrap());

/// Splits a `---` delimited YAML block off the top of a markdown document.
///
/// Returns `(front_matter, body)`. Documents without a block yield `None`
/// and the whole input as body.
pub fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    match FRONT_MATTER.captures(source) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            (caps.get(1).map(|m| m.as_str()), &source[whole..])
        }
        None => (None, source),
    }
}

/// Renders CommonMark (plus tables, footnotes and strikethrough) to HTML.
pub fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(body, options);
    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
