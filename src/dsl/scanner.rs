//! Scanner (tokenizer) for circuit definition files.

use std::io::{self, Write};

use tracing::trace;

use crate::names::{NameId, Names};

/// Character that opens and closes a comment.
pub const COMMENT_MARKER: char = '#';

/// Reserved words of the definition language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// Opens the device list
    Devices,
    /// Opens the connection list
    Connections,
    /// Opens the monitor list
    Monitor,
    /// Closes a section
    End,
    /// Closes the file
    MainEnd,
}

impl Keyword {
    /// All keywords, in the order their names are interned.
    pub const ALL: [Keyword; 5] = [
        Keyword::Devices,
        Keyword::Connections,
        Keyword::Monitor,
        Keyword::End,
        Keyword::MainEnd,
    ];

    /// The keyword's spelling in source text.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Devices => "DEVICES",
            Keyword::Connections => "CONNECTIONS",
            Keyword::Monitor => "MONITOR",
            Keyword::End => "END",
            Keyword::MainEnd => "MAIN_END",
        }
    }

    /// Match a word against the reserved spellings (case sensitive).
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kw| kw.as_str() == word)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Symbol types produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// ','
    Comma,
    /// ';'
    Semicolon,
    /// '='
    Equals,
    /// '-'
    Dash,
    /// '.'
    Dot,
    /// A reserved word
    Keyword(Keyword),
    /// An unsigned integer literal
    Number(i64),
    /// Any other identifier, interned
    Name(NameId),
    /// A comment was still open at end of input
    UnterminatedComment,
    /// End of input; repeated on every later call
    Eof,
}

/// A symbol produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// The kind of symbol, with its payload
    pub kind: TokenKind,
    /// Line number of the first character (1-indexed)
    pub line: u32,
    /// Column number of the first character (1-indexed)
    pub column: u32,
}

impl Symbol {
    /// Interned id of a `Name` symbol.
    pub fn name(&self) -> Option<NameId> {
        match self.kind {
            TokenKind::Name(id) => Some(id),
            _ => None,
        }
    }

    /// Value of a `Number` symbol.
    pub fn number(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Check whether this symbol is the given keyword.
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

/// Scanner over the text of one definition file.
///
/// Whitespace and `#`-delimited comments are skipped. Characters that cannot
/// start a symbol are dropped without complaint; the parser is the only
/// layer with enough context to say something useful about the input.
pub struct Scanner<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    names: &'a mut Names,
    keyword_ids: [NameId; 5],
    line: u32,
    column: u32,
}

impl<'a> Scanner<'a> {
    /// Create a scanner for `input`, interning the keywords into `names`.
    pub fn new(input: &'a str, names: &'a mut Names) -> Self {
        let keyword_ids = Keyword::ALL.map(|kw| names.intern(kw.as_str()));
        Self {
            input,
            chars: input.char_indices().peekable(),
            names,
            keyword_ids,
            line: 1,
            column: 1,
        }
    }

    /// Interned id of a keyword's spelling.
    pub fn keyword_id(&self, keyword: Keyword) -> NameId {
        self.keyword_ids[keyword.index()]
    }

    /// Interned id carried by a `Name` or `Keyword` symbol.
    pub fn name_id(&self, symbol: &Symbol) -> Option<NameId> {
        match symbol.kind {
            TokenKind::Name(id) => Some(id),
            TokenKind::Keyword(kw) => Some(self.keyword_id(kw)),
            _ => None,
        }
    }

    /// Get the next symbol.
    pub fn get_symbol(&mut self) -> Symbol {
        loop {
            if let Some((line, column)) = self.skip_whitespace_and_comments() {
                return Symbol {
                    kind: TokenKind::UnterminatedComment,
                    line,
                    column,
                };
            }

            let line = self.line;
            let column = self.column;
            let ch = match self.chars.peek() {
                Some(&(_, ch)) => ch,
                None => {
                    return Symbol {
                        kind: TokenKind::Eof,
                        line,
                        column,
                    };
                }
            };

            let kind = match ch {
                ',' => self.punctuation(TokenKind::Comma),
                ';' => self.punctuation(TokenKind::Semicolon),
                '=' => self.punctuation(TokenKind::Equals),
                '-' => self.punctuation(TokenKind::Dash),
                '.' => self.punctuation(TokenKind::Dot),
                _ if ch.is_alphabetic() => {
                    let text = self.read_name();
                    match Keyword::from_word(&text) {
                        Some(kw) => TokenKind::Keyword(kw),
                        None => TokenKind::Name(self.names.intern(&text)),
                    }
                }
                _ if ch.is_ascii_digit() => TokenKind::Number(self.read_number()),
                _ => {
                    trace!(line, column, ?ch, "skipping unrecognised character");
                    self.advance();
                    continue;
                }
            };

            return Symbol { kind, line, column };
        }
    }

    /// Print the source line holding `symbol`, then a caret under its column.
    ///
    /// The caret for an `Eof` symbol sits under the last visible character
    /// of the file instead of past the end of the buffer. Tabs before the
    /// column are repeated in the padding so the caret lines up however the
    /// terminal expands them.
    pub fn print_location<W: Write>(&self, symbol: &Symbol, out: &mut W) -> io::Result<()> {
        let (text, column) = self.location_line(symbol);
        let padding: String = text
            .chars()
            .chain(std::iter::repeat(' '))
            .take(column.saturating_sub(1) as usize)
            .map(|ch| if ch == '\t' { '\t' } else { ' ' })
            .collect();
        writeln!(out, "{}", text)?;
        writeln!(out, "{}^", padding)
    }

    fn location_line(&self, symbol: &Symbol) -> (&'a str, u32) {
        let lines: Vec<&'a str> = self.input.lines().collect();
        let index = (symbol.line as usize).saturating_sub(1);

        if symbol.kind != TokenKind::Eof {
            return (lines.get(index).copied().unwrap_or(""), symbol.column);
        }

        // Walk back over empty trailing lines to the last real character.
        let last = index.min(lines.len().saturating_sub(1));
        for &line in lines[..lines.len().min(last + 1)].iter().rev() {
            let visible = line.trim_end();
            if !visible.is_empty() {
                return (line, visible.chars().count() as u32);
            }
        }
        ("", 1)
    }

    fn punctuation(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn advance(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Skip whitespace and comments.
    ///
    /// Returns the position of the opening marker if input ends inside a
    /// comment.
    fn skip_whitespace_and_comments(&mut self) -> Option<(u32, u32)> {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == COMMENT_MARKER {
                let opening = (self.line, self.column);
                self.advance();
                loop {
                    match self.advance() {
                        Some(COMMENT_MARKER) => break,
                        Some(_) => {}
                        None => return Some(opening),
                    }
                }
            } else {
                break;
            }
        }
        None
    }

    fn read_name(&mut self) -> String {
        let mut text = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_number(&mut self) -> i64 {
        let mut text = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        // Only overflow can fail here; saturate and let the qualifier check reject it.
        text.parse().unwrap_or(i64::MAX)
    }
}
