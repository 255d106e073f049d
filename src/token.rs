/// Token types produced by the lexer
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Header {
        level: usize, // Number of leading '#' characters, at least 1
    },
    Image {
        alt: String,
        src: String,
    },
    Link {
        alt: String,
        src: String,
    },
    Paragraph, // Never emitted by the lexer
    Italic,
    Bold,
    Code(String), // Body of a fenced block, fences excluded
    Html(String), // Raw tag, passed through unchanged
    Text(String),
    Newline,
}

/// Payload-free discriminant of a [`Token`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Header,
    Image,
    Link,
    Paragraph,
    Italic,
    Bold,
    Code,
    Html,
    Text,
    Newline,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Header { .. } => TokenKind::Header,
            Token::Image { .. } => TokenKind::Image,
            Token::Link { .. } => TokenKind::Link,
            Token::Paragraph => TokenKind::Paragraph,
            Token::Italic => TokenKind::Italic,
            Token::Bold => TokenKind::Bold,
            Token::Code(_) => TokenKind::Code,
            Token::Html(_) => TokenKind::Html,
            Token::Text(_) => TokenKind::Text,
            Token::Newline => TokenKind::Newline,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Header { level } => write!(f, "Header {{ level = {} }}", level),
            Token::Image { alt, src } => write!(f, "Image {{ alt = {:?}, src = {:?} }}", alt, src),
            Token::Link { alt, src } => write!(f, "Link {{ alt = {:?}, src = {:?} }}", alt, src),
            Token::Code(text) => write!(f, "Code {{ text = {:?} }}", text),
            Token::Html(text) => write!(f, "Html {{ text = {:?} }}", text),
            Token::Text(text) => write!(f, "Text {{ text = {:?} }}", text),
            Token::Paragraph | Token::Italic | Token::Bold | Token::Newline => {
                write!(f, "{:?}", self.kind())
            }
        }
    }
}
