//! A small tokenizer for the typed-source subset the stripper accepts.

/// What a token is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident,
    Number,
    Str,
    Punct,
}

/// One token, with its location in the input.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset into the input.
    pub offset: u32,
    /// 0-based line.
    pub line: u32,
    /// 0-based byte column.
    pub column: u32,
    /// Whitespace or a comment directly precedes the token.
    pub spaced: bool,
}

impl Token<'_> {
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }

    /// Byte offset of the start of the token's line.
    pub fn line_start(&self) -> usize {
        (self.offset - self.column) as usize
    }
}

/// A problem found while tokenizing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LexError {
    pub message: String,
    pub offset: u32,
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    line_start: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(c)
    }

    fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Splits `src` into tokens, skipping whitespace and comments.
///
/// Lexing never stops early: an unterminated string or comment is reported
/// and the rest of the line (or file) is consumed.
pub(crate) fn tokenize(src: &str) -> (Vec<Token<'_>>, Vec<LexError>) {
    let mut cur = Cursor {
        src,
        pos: 0,
        line: 0,
        line_start: 0,
    };
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut spaced = false;

    while let Some(c) = cur.peek() {
        if c == '\n' {
            cur.bump();
            spaced = false;
            continue;
        }
        if c.is_whitespace() {
            cur.bump();
            spaced = true;
            continue;
        }
        if c == '/' && cur.peek_second() == Some('/') {
            cur.eat_while(|c| c != '\n');
            spaced = true;
            continue;
        }
        if c == '/' && cur.peek_second() == Some('*') {
            cur.bump();
            cur.bump();
            let closed = loop {
                match cur.bump() {
                    Some('*') if cur.peek() == Some('/') => {
                        cur.bump();
                        break true;
                    }
                    Some(_) => {}
                    None => break false,
                }
            };
            if !closed {
                errors.push(LexError {
                    message: "'*/' expected.".to_string(),
                    offset: src.len() as u32,
                });
            }
            spaced = true;
            continue;
        }

        let start = cur.pos;
        let line = cur.line;
        let column = (start - cur.line_start) as u32;
        let kind = if is_ident_start(c) {
            cur.eat_while(is_ident_continue);
            TokenKind::Ident
        } else if c.is_ascii_digit() {
            cur.eat_while(|c| is_ident_continue(c) || c == '.');
            TokenKind::Number
        } else if matches!(c, '"' | '\'' | '`') {
            cur.bump();
            let mut escaped = false;
            let mut terminated = false;
            while let Some(next) = cur.peek() {
                if next == '\n' {
                    break;
                }
                cur.bump();
                if escaped {
                    escaped = false;
                } else if next == '\\' {
                    escaped = true;
                } else if next == c {
                    terminated = true;
                    break;
                }
            }
            if !terminated {
                errors.push(LexError {
                    message: "Unterminated string literal.".to_string(),
                    offset: start as u32,
                });
            }
            TokenKind::Str
        } else {
            cur.bump();
            TokenKind::Punct
        };

        tokens.push(Token {
            kind,
            text: &src[start..cur.pos],
            offset: start as u32,
            line,
            column,
            spaced,
        });
        spaced = false;
    }

    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(src: &str) -> Vec<&str> {
        tokenize(src).0.iter().map(|t| t.text).collect()
    }

    #[test]
    fn splits_identifiers_and_punctuation() {
        assert_eq!(
            texts("let a: number = 10;"),
            vec!["let", "a", ":", "number", "=", "10", ";"]
        );
    }

    #[test]
    fn tracks_lines_columns_and_spacing() {
        let (tokens, _) = tokenize("a\n  b(c)");
        let b = tokens[1];
        assert_eq!((b.line, b.column, b.offset), (1, 2, 4));
        assert!(b.spaced);
        assert!(!tokens[2].spaced);
        assert_eq!(b.line_start(), 2);
    }

    #[test]
    fn skips_comments() {
        assert_eq!(texts("a // note\n/* block\n */ b"), vec!["a", "b"]);
        let (tokens, _) = tokenize("a /* x */b");
        assert!(tokens[1].spaced);
    }

    #[test]
    fn strings_are_single_tokens() {
        let (tokens, errors) = tokenize(r#"x = "a \" b";"#);
        assert!(errors.is_empty());
        assert_eq!(tokens[2].text, r#""a \" b""#);
        assert_eq!(tokens[2].kind, TokenKind::Str);
    }

    #[test]
    fn unterminated_string_is_reported() {
        let (_, errors) = tokenize("ok;\nx = 'abc\ny");
        assert_eq!(
            errors,
            vec![LexError {
                message: "Unterminated string literal.".to_string(),
                offset: 8,
            }]
        );
    }

    #[test]
    fn unterminated_comment_is_reported_at_end() {
        let (_, errors) = tokenize("a /* open");
        assert_eq!(errors[0].offset, 9);
    }
}
