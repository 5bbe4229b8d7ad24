//! Markdown body rendering.

use pulldown_cmark::{html, Options, Parser};

/// Renders a markdown body to an HTML fragment.
///
/// Tables and strikethrough are enabled; everything else is CommonMark.
pub fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(body, options);
    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
