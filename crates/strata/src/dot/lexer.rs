#[derive(Debug, Clone, PartialEq)]
pub(super) enum Tok {
    Strict,
    Graph,
    Digraph,
    Node,
    Edge,
    Subgraph,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Eq,
    Semi,
    Comma,
    Colon,
    /// `->`
    Arrow,
    /// `--`
    Line,
    Id(String),
}

impl Tok {
    pub(super) fn describe(&self) -> String {
        match self {
            Tok::Strict => "`strict`".to_string(),
            Tok::Graph => "`graph`".to_string(),
            Tok::Digraph => "`digraph`".to_string(),
            Tok::Node => "`node`".to_string(),
            Tok::Edge => "`edge`".to_string(),
            Tok::Subgraph => "`subgraph`".to_string(),
            Tok::LBrace => "`{`".to_string(),
            Tok::RBrace => "`}`".to_string(),
            Tok::LBracket => "`[`".to_string(),
            Tok::RBracket => "`]`".to_string(),
            Tok::Eq => "`=`".to_string(),
            Tok::Semi => "`;`".to_string(),
            Tok::Comma => "`,`".to_string(),
            Tok::Colon => "`:`".to_string(),
            Tok::Arrow => "`->`".to_string(),
            Tok::Line => "`--`".to_string(),
            Tok::Id(id) => format!("identifier {id:?}"),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub(super) struct LexError {
    pub offset: usize,
    pub message: String,
}

pub(super) type Spanned = (usize, Tok, usize);

pub(super) struct Lexer<'input> {
    input: &'input str,
    pos: usize,
}

impl<'input> Lexer<'input> {
    pub(super) fn new(input: &'input str) -> Self {
        Self { input, pos: 0 }
    }

    pub(super) fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut out = Vec::new();
        while let Some(tok) = self.next_token()? {
            out.push(tok);
        }
        Ok(out)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + ahead).copied()
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> LexError {
        LexError {
            offset,
            message: message.into(),
        }
    }

    /// True when only whitespace precedes `pos` on its line.
    fn at_line_start(&self) -> bool {
        self.input[..self.pos]
            .bytes()
            .rev()
            .take_while(|&b| b != b'\n')
            .all(|b| b == b' ' || b == b'\t' || b == b'\r')
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'/') if self.peek_at(1) == Some(b'/') => self.skip_line(),
                Some(b'#') if self.at_line_start() => self.skip_line(),
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    let start = self.pos;
                    match self.input[self.pos + 2..].find("*/") {
                        Some(end) => self.pos += 2 + end + 2,
                        None => return Err(self.error(start, "unterminated comment")),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) {
        match self.input[self.pos..].find('\n') {
            Some(end) => self.pos += end + 1,
            None => self.pos = self.input.len(),
        }
    }

    fn next_token(&mut self) -> Result<Option<Spanned>, LexError> {
        self.skip_trivia()?;
        let start = self.pos;
        let Some(b) = self.peek() else {
            return Ok(None);
        };

        let punct = match b {
            b'{' => Some(Tok::LBrace),
            b'}' => Some(Tok::RBrace),
            b'[' => Some(Tok::LBracket),
            b']' => Some(Tok::RBracket),
            b'=' => Some(Tok::Eq),
            b';' => Some(Tok::Semi),
            b',' => Some(Tok::Comma),
            b':' => Some(Tok::Colon),
            _ => None,
        };
        if let Some(tok) = punct {
            self.pos += 1;
            return Ok(Some((start, tok, self.pos)));
        }

        let tok = match b {
            b'-' if self.peek_at(1) == Some(b'>') => {
                self.pos += 2;
                Tok::Arrow
            }
            b'-' if self.peek_at(1) == Some(b'-') => {
                self.pos += 2;
                Tok::Line
            }
            b'"' => Tok::Id(self.quoted()?),
            b'<' => Tok::Id(self.html()?),
            b'-' | b'.' | b'0'..=b'9' => Tok::Id(self.numeral()?),
            b if b == b'_' || b.is_ascii_alphabetic() || b >= 0x80 => {
                let word = self.ident();
                match word.to_ascii_lowercase().as_str() {
                    "strict" => Tok::Strict,
                    "graph" => Tok::Graph,
                    "digraph" => Tok::Digraph,
                    "node" => Tok::Node,
                    "edge" => Tok::Edge,
                    "subgraph" => Tok::Subgraph,
                    _ => Tok::Id(word),
                }
            }
            _ => {
                let ch = self.input[start..].chars().next().unwrap_or('?');
                return Err(self.error(start, format!("unexpected character {ch:?}")));
            }
        };
        Ok(Some((start, tok, self.pos)))
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'_' || b.is_ascii_alphanumeric() || b >= 0x80 {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    fn numeral(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        let mut digits = 0usize;
        let mut seen_dot = false;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => digits += 1,
                b'.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            self.pos += 1;
        }
        if digits == 0 {
            return Err(self.error(start, "malformed number"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// A double-quoted string, including `"a" + "b"` concatenation.
    fn quoted(&mut self) -> Result<String, LexError> {
        let mut out = self.quoted_part()?;
        loop {
            let save = self.pos;
            self.skip_trivia()?;
            if self.peek() == Some(b'+') {
                self.pos += 1;
                self.skip_trivia()?;
                if self.peek() == Some(b'"') {
                    out.push_str(&self.quoted_part()?);
                    continue;
                }
            }
            self.pos = save;
            return Ok(out);
        }
    }

    fn quoted_part(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        let mut chars = self.input[self.pos..].char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, '"')) => out.push('"'),
                    Some((_, 'n' | 'l' | 'r')) => out.push('\n'),
                    Some((_, '\n')) => {}
                    Some((_, other)) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => break,
                },
                c => out.push(c),
            }
        }
        Err(self.error(start, "unterminated string"))
    }

    /// An HTML-like `<...>` id; the content between the outer brackets is kept verbatim.
    fn html(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        let mut depth = 0usize;
        for (i, b) in self.input.as_bytes()[self.pos..].iter().enumerate() {
            match b {
                b'<' => depth += 1,
                b'>' => {
                    depth -= 1;
                    if depth == 0 {
                        let body = self.input[start + 1..start + i].to_string();
                        self.pos = start + i + 1;
                        return Ok(body);
                    }
                }
                _ => {}
            }
        }
        Err(self.error(start, "unterminated HTML string"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(input: &str) -> Vec<Tok> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|(_, t, _)| t)
            .collect()
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            toks("DiGraph G { Node }"),
            vec![
                Tok::Digraph,
                Tok::Id("G".into()),
                Tok::LBrace,
                Tok::Node,
                Tok::RBrace
            ]
        );
    }

    #[test]
    fn edges_numbers_and_comments() {
        assert_eq!(
            toks("a->-1.5 // trailing\n/* block */ b -- .5\n# pragma\n"),
            vec![
                Tok::Id("a".into()),
                Tok::Arrow,
                Tok::Id("-1.5".into()),
                Tok::Id("b".into()),
                Tok::Line,
                Tok::Id(".5".into()),
            ]
        );
    }

    #[test]
    fn quoted_strings_unescape_and_concatenate() {
        assert_eq!(
            toks(r#""say \"hi\"\nthere" + " again""#),
            vec![Tok::Id("say \"hi\"\nthere again".into())]
        );
    }

    #[test]
    fn html_ids_keep_nested_markup() {
        assert_eq!(toks("<<b>bold</b>>"), vec![Tok::Id("<b>bold</b>".into())]);
    }

    #[test]
    fn unterminated_string_reports_offset() {
        let err = Lexer::new("a -> \"oops").tokenize().unwrap_err();
        assert_eq!(err.offset, 5);
    }
}
