/// Single-pass lexer for the Markdown dialect
use crate::token::Token;
use tracing::{debug, trace};

/// Scans the input once, left to right, producing a flat token stream.
///
/// Links, images, fenced code and inline HTML are attempted greedily from a
/// single saved cursor position. When one of them turns out to be malformed
/// the cursor is restored and the same bytes are lexed as plain text instead.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    saved: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            saved: 0,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        while let Some(byte) = self.peek() {
            match byte {
                b' ' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    self.emit(Token::Newline);
                }
                b'#' => self.lex_header(),
                b'<' => self.attempt(Self::try_html),
                b'`' => self.attempt(Self::try_code),
                b'!' => self.attempt(|lexer| lexer.try_link(true)),
                b'[' => self.attempt(|lexer| lexer.try_link(false)),
                b'*' => self.lex_emphasis(),
                b if is_text(b) => self.lex_text(),
                // Tabs, carriage returns, control and non-ASCII bytes
                _ => self.pos += 1,
            }
        }

        debug!(token_count = self.tokens.len(), "Tokenized input");
        self.tokens
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn rest(&self) -> &'a [u8] {
        &self.input.as_bytes()[self.pos..]
    }

    fn save(&mut self) {
        self.saved = self.pos;
    }

    fn restore(&mut self) {
        self.pos = self.saved;
    }

    fn emit(&mut self, token: Token) {
        trace!(token = %token, "Lexed token");
        self.tokens.push(token);
    }

    /// Run a greedy construct, falling back to text from the saved position on failure
    fn attempt(&mut self, construct: impl FnOnce(&mut Self) -> Option<Token>) {
        self.save();
        match construct(self) {
            Some(token) => self.emit(token),
            None => {
                self.restore();
                self.lex_text();
            }
        }
    }

    /// Count the run of `byte` starting at the cursor and move past it
    fn consume_run(&mut self, byte: u8) -> usize {
        let count = self.rest().iter().take_while(|&&b| b == byte).count();
        self.pos += count;
        count
    }

    /// Collect everything up to (not including) `delimiter`, leaving the cursor on it.
    /// Returns None if the input ends first.
    fn scan_until(&mut self, delimiter: u8) -> Option<&'a str> {
        let input = self.input;
        let len = self.rest().iter().position(|&b| b == delimiter)?;
        let start = self.pos;
        self.pos += len;
        Some(&input[start..self.pos])
    }

    fn lex_header(&mut self) {
        let level = self.consume_run(b'#');
        self.emit(Token::Header { level });

        if self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn try_html(&mut self) -> Option<Token> {
        let start = self.pos;
        self.scan_until(b'>')?;
        self.pos += 1;
        Some(Token::Html(self.input[start..self.pos].to_string()))
    }

    fn try_code(&mut self) -> Option<Token> {
        if !self.rest().starts_with(b"```") {
            return None;
        }
        self.pos += 3;

        let body = self.scan_until(b'`')?;
        if !self.rest().starts_with(b"```") {
            return None;
        }
        self.pos += 3;

        Some(Token::Code(body.to_string()))
    }

    /// `[alt](src)`, or `![alt](src)` when `image` is set
    fn try_link(&mut self, image: bool) -> Option<Token> {
        if image {
            self.pos += 1; // '!'
        }
        if self.peek() != Some(b'[') {
            return None;
        }
        self.pos += 1;

        let alt = self.scan_until(b']')?.to_string();
        self.pos += 1;

        if self.peek() != Some(b'(') {
            return None;
        }
        self.pos += 1;

        let src = self.scan_until(b')')?.to_string();
        self.pos += 1;

        Some(if image {
            Token::Image { alt, src }
        } else {
            Token::Link { alt, src }
        })
    }

    fn lex_emphasis(&mut self) {
        let start = self.pos;
        let token = match self.consume_run(b'*') {
            1 => Token::Italic,
            2 => Token::Bold,
            // Longer runs have no emphasis meaning and stay literal
            _ => Token::Text(self.input[start..self.pos].to_string()),
        };
        self.emit(token);
    }

    fn lex_text(&mut self) {
        let len = self.rest().iter().take_while(|&&b| is_text(b)).count();
        if len == 0 {
            self.pos += 1;
            return;
        }

        let start = self.pos;
        self.pos += len;
        let text = self.input[start..self.pos].to_string();
        self.emit(Token::Text(text));
    }
}

/// Visible ASCII plus space, minus the emphasis marker
fn is_text(byte: u8) -> bool {
    matches!(byte, b' '..=b'~') && byte != b'*'
}
