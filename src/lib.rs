/// A converter from a small Markdown dialect to HTML
pub mod error;
pub mod lexer;
pub mod renderer;
pub mod token;

use std::fs;
use std::path::Path;

pub use error::{Error, Result};
use lexer::Lexer;
use renderer::HtmlRenderer;
use token::Token;

/// Split markdown text into tokens
pub fn tokenize(markdown: &str) -> Vec<Token> {
    Lexer::new(markdown).tokenize()
}

/// Render a token stream to HTML
pub fn render(tokens: &[Token]) -> String {
    HtmlRenderer::new().render(tokens)
}

/// Convert markdown text to HTML
pub fn convert(markdown: &str) -> String {
    render(&tokenize(markdown))
}

/// Read a markdown file fully into memory and convert it
pub fn convert_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read source");
    Ok(convert(&String::from_utf8_lossy(&bytes)))
}
