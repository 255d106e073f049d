/// HTML renderer for the lexer's token stream
use crate::token::Token;
use std::mem;
use tracing::{debug, trace};

const HEADER_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        HtmlRenderer
    }

    /// Render a token stream in a single forward pass.
    ///
    /// Open elements live on a LIFO stack. Bare text and emphasis outside any
    /// element open an implicit paragraph, a header closes at the end of its
    /// line, and every third newline seen with something open closes the top
    /// element. Whatever is still open after the last token is closed in
    /// stack order.
    pub fn render(&self, tokens: &[Token]) -> String {
        let mut state = RenderState::default();
        let mut prev: Option<&Token> = None;

        for (index, token) in tokens.iter().enumerate() {
            let is_last = index + 1 == tokens.len();

            match token {
                Token::Bold => state.toggle(Block::Bold),
                Token::Italic => state.toggle(Block::Italic),
                Token::Header { level } => state.toggle(Block::Header(*level)),
                Token::Image { alt, src } => render_image(&mut state.out, alt, src),
                Token::Link { alt, src } => render_link(&mut state.out, alt, src),
                Token::Text(text) => {
                    // Text right after raw HTML is not wrapped
                    if state.stack.is_empty() && !matches!(prev, Some(Token::Html(_))) {
                        state.push(Block::Paragraph);
                    }
                    state.out.push_str(text);
                }
                Token::Code(text) => {
                    state.out.push_str("<pre><code>");
                    state.out.push_str(text);
                    state.out.push_str("</code></pre>");
                }
                Token::Html(html) => state.out.push_str(html),
                Token::Newline => state.newline(is_last),
                Token::Paragraph => {}
            }

            prev = Some(token);
        }

        state.drain();
        debug!(bytes = state.out.len(), "Rendered HTML");
        state.out
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// An element currently open on the render stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Paragraph,
    Header(usize),
    Bold,
    Italic,
}

impl Block {
    fn tag_name(self) -> &'static str {
        match self {
            Block::Paragraph => "p",
            Block::Header(level) => HEADER_TAGS[level.clamp(1, HEADER_TAGS.len()) - 1],
            Block::Bold => "strong",
            Block::Italic => "em",
        }
    }

    /// Header levels don't matter: any header closes any header
    fn same_kind(self, other: Block) -> bool {
        mem::discriminant(&self) == mem::discriminant(&other)
    }
}

#[derive(Default)]
struct RenderState {
    stack: Vec<Block>,
    out: String,
    newlines: u8,
}

impl RenderState {
    fn push(&mut self, block: Block) {
        trace!(?block, depth = self.stack.len(), "Push");
        self.out.push('<');
        self.out.push_str(block.tag_name());
        self.out.push('>');
        self.stack.push(block);
    }

    /// Close and pop the top element; no-op on an empty stack
    fn pop(&mut self) {
        if let Some(block) = self.stack.pop() {
            trace!(?block, depth = self.stack.len(), "Pop");
            self.out.push_str("</");
            self.out.push_str(block.tag_name());
            self.out.push('>');
        }
    }

    fn toggle(&mut self, block: Block) {
        match self.stack.last().copied() {
            None => {
                if matches!(block, Block::Bold | Block::Italic) {
                    self.push(Block::Paragraph);
                }
                self.push(block);
            }
            Some(top) if top.same_kind(block) => self.pop(),
            Some(Block::Paragraph) => self.push(block),
            Some(top) => trace!(?block, ?top, "Dropped"),
        }
    }

    fn newline(&mut self, is_last: bool) {
        if self.stack.is_empty() {
            return;
        }

        if let Some(Block::Header(_)) = self.stack.last() {
            self.pop();
        }

        if self.newlines == 2 || is_last {
            self.pop();
            self.newlines = 0;
        }

        self.out.push('\n');
        self.newlines += 1;
    }

    fn drain(&mut self) {
        while !self.stack.is_empty() {
            self.pop();
        }
    }
}

fn render_image(out: &mut String, alt: &str, src: &str) {
    out.push_str("<img src=\"");
    out.push_str(src);
    out.push_str("\" alt=\"");
    out.push_str(alt);
    out.push_str("\" \\>");
}

fn render_link(out: &mut String, alt: &str, src: &str) {
    let label = if alt.is_empty() { src } else { alt };
    out.push_str("<a href=\"");
    out.push_str(src);
    out.push_str("\" alt=\"");
    out.push_str(alt);
    out.push_str("\">");
    out.push_str(label);
    out.push_str("</a>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(tokens: &[Token]) -> String {
        HtmlRenderer::new().render(tokens)
    }

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_text_opens_paragraph() {
        assert_eq!(render(&[text("hi"), Token::Newline]), "<p>hi</p>\n");
    }

    #[test]
    fn test_text_after_html_is_not_wrapped() {
        assert_eq!(
            render(&[Token::Html("<b>".to_string()), text("x")]),
            "<b>x"
        );
    }

    #[test]
    fn test_header_does_not_open_paragraph() {
        assert_eq!(
            render(&[Token::Header { level: 2 }, text("Sub"), Token::Newline]),
            "<h2>Sub</h2>\n"
        );
    }

    #[test]
    fn test_header_level_is_clamped() {
        assert_eq!(render(&[Token::Header { level: 9 }, text("x")]), "<h6>x</h6>");
    }

    #[test]
    fn test_header_closes_at_newline_before_end() {
        assert_eq!(
            render(&[
                Token::Header { level: 1 },
                text("T"),
                Token::Newline,
                text("body"),
                Token::Newline
            ]),
            "<h1>T</h1>\n<p>body</p>\n"
        );
    }

    #[test]
    fn test_emphasis_opens_paragraph_and_toggles() {
        assert_eq!(
            render(&[Token::Italic, text("a"), Token::Italic, text(" b")]),
            "<p><em>a</em> b</p>"
        );
    }

    #[test]
    fn test_emphasis_inside_header_is_dropped() {
        assert_eq!(
            render(&[
                Token::Header { level: 1 },
                Token::Bold,
                text("x"),
                Token::Bold,
                Token::Newline
            ]),
            "<h1>x</h1>\n"
        );
    }

    #[test]
    fn test_nested_emphasis_drops_inner_mismatch() {
        // Italic inside bold has no paragraph on top, so it is dropped
        assert_eq!(
            render(&[Token::Bold, Token::Italic, text("x"), Token::Bold]),
            "<p><strong>x</strong></p>"
        );
    }

    #[test]
    fn test_header_inside_paragraph() {
        assert_eq!(
            render(&[text("a"), Token::Header { level: 1 }, text("b"), Token::Newline]),
            "<p>a<h1>b</h1></p>\n"
        );
    }

    #[test]
    fn test_third_newline_closes_paragraph() {
        assert_eq!(
            render(&[
                text("a"),
                Token::Newline,
                Token::Newline,
                Token::Newline,
                text("b"),
                Token::Newline,
            ]),
            "<p>a\n\n</p>\n<p>b</p>\n"
        );
    }

    #[test]
    fn test_newline_counter_spans_text() {
        // The counter is only reset when it closes something
        assert_eq!(
            render(&[
                text("a"),
                Token::Newline,
                text("b"),
                Token::Newline,
                text("c"),
                Token::Newline,
                text("d"),
            ]),
            "<p>a\nb\nc</p>\n<p>d</p>"
        );
    }

    #[test]
    fn test_newline_on_empty_stack_is_silent() {
        assert_eq!(
            render(&[Token::Newline, Token::Newline, text("x")]),
            "<p>x</p>"
        );
    }

    #[test]
    fn test_html_leaves_stack_alone() {
        assert_eq!(
            render(&[
                text("a"),
                Token::Newline,
                Token::Newline,
                Token::Html("<hr>".to_string()),
                Token::Newline,
            ]),
            "<p>a\n\n<hr></p>\n"
        );
    }

    #[test]
    fn test_drain_closes_in_lifo_order() {
        assert_eq!(
            render(&[Token::Bold, text("x")]),
            "<p><strong>x</strong></p>"
        );
    }

    #[test]
    fn test_image_ignores_stack() {
        assert_eq!(
            render(&[Token::Image {
                alt: "alt".to_string(),
                src: "src.png".to_string()
            }]),
            "<img src=\"src.png\" alt=\"alt\" \\>"
        );
    }

    #[test]
    fn test_link_label_falls_back_to_src() {
        assert_eq!(
            render(&[Token::Link {
                alt: String::new(),
                src: "http://x".to_string()
            }]),
            "<a href=\"http://x\" alt=\"\">http://x</a>"
        );
    }

    #[test]
    fn test_link_inside_paragraph() {
        assert_eq!(
            render(&[
                text("see "),
                Token::Link {
                    alt: "docs".to_string(),
                    src: "/d".to_string()
                },
                Token::Newline
            ]),
            "<p>see <a href=\"/d\" alt=\"docs\">docs</a></p>\n"
        );
    }

    #[test]
    fn test_code_is_atomic() {
        assert_eq!(
            render(&[Token::Code("\nx\n".to_string()), Token::Newline]),
            "<pre><code>\nx\n</code></pre>"
        );
    }

    #[test]
    fn test_paragraph_token_is_ignored() {
        assert_eq!(render(&[Token::Paragraph, Token::Newline]), "");
    }
}
