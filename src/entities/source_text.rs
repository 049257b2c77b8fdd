//! Delimiter scanning over schema source text.
//!
//! Quoted strings and `//` / `/* */` comments are skipped, so a `{}` default
//! value or an apostrophe in a comment never shifts the nesting.

/// Byte offsets and values of every byte outside strings and comments.
struct CodeBytes<'a> {
    bytes: &'a [u8],
    pos: usize,
}

fn code_bytes(text: &str) -> CodeBytes<'_> {
    CodeBytes { bytes: text.as_bytes(), pos: 0 }
}

impl Iterator for CodeBytes<'_> {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.bytes.len() {
            let idx = self.pos;
            let byte = self.bytes[idx];
            self.pos += 1;
            match byte {
                b'"' | b'\'' | b'`' => self.skip_string(byte),
                b'/' if self.peek() == Some(b'/') => self.skip_line(),
                b'/' if self.peek() == Some(b'*') => self.skip_block_comment(),
                _ => return Some((idx, byte)),
            }
        }
        None
    }
}

impl CodeBytes<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_string(&mut self, quote: u8) {
        while self.pos < self.bytes.len() {
            let byte = self.bytes[self.pos];
            self.pos += 1;
            if byte == b'\\' {
                self.pos += 1;
            } else if byte == quote {
                return;
            }
        }
    }

    fn skip_line(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 1;
        while self.pos + 1 < self.bytes.len() {
            if self.bytes[self.pos] == b'*' && self.bytes[self.pos + 1] == b'/' {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
        self.pos = self.bytes.len();
    }
}

/// Text between the delimiter that opened just before `start` and its
/// matching `close`. Unbalanced input yields everything to the end.
pub(crate) fn balanced_body(content: &str, start: usize, open: u8, close: u8) -> &str {
    let rest = &content[start..];
    let mut depth = 1usize;
    for (idx, byte) in code_bytes(rest) {
        if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                return &rest[..idx];
            }
        }
    }
    rest
}

/// Bracket nesting depth (`{`, `(`, `[`) in front of byte `offset`.
pub(crate) fn depth_at(text: &str, offset: usize) -> usize {
    let mut depth = 0usize;
    for (_, byte) in code_bytes(text).take_while(|(idx, _)| *idx < offset) {
        match byte {
            b'{' | b'(' | b'[' => depth += 1,
            b'}' | b')' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}
