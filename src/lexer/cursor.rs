use std::str::Chars;

/// Character cursor over the source, tracking the byte offset it stands at.
#[derive(Clone)]
pub struct Cursor<'a> {
    chars: Chars<'a>,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn at(s: &'a str, offset: usize) -> Self {
        let chars = s[offset..].chars();
        Self { chars, offset }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub fn peek_2nd(&self) -> Option<char> {
        // cheap to clone
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    #[inline]
    pub fn skip_if(&mut self, p: impl FnOnce(char) -> bool) -> bool {
        let skipped = self.peek().filter(|&c| p(c)).is_some();
        if skipped {
            self.take();
        }
        skipped
    }

    pub fn skip_whitespaces(&mut self) {
        while self.skip_if(char::is_whitespace) {}
    }

    fn at_line_comment(&self) -> bool {
        self.peek() == Some('/') && self.peek_2nd() == Some('/')
    }

    /// Skips whitespace and `//` comments. A comment runs up to, not including, the newline.
    pub fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespaces();
            if !self.at_line_comment() {
                break;
            }
            while self.skip_if(|c| c != '\n') {}
        }
    }

    pub fn take(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn as_str(&self) -> &'a str {
        self.chars.as_str()
    }

    pub fn is_eof(&self) -> bool {
        self.as_str().is_empty()
    }
}
