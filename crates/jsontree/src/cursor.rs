//! Read-only position tracking over the input bytes.
//!
//! The cursor never allocates and never mutates the input; the only state it
//! owns is the current offset. `peek` returns `None` as the end-of-input
//! sentinel.

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'src> {
    input: &'src [u8],
    offset: usize,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(input: &'src [u8]) -> Self {
        Self { input, offset: 0 }
    }

    /// The byte at the current offset, or `None` at end of input.
    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.get(self.offset).copied()
    }

    /// Consumes one byte. Advancing past the end is a no-op.
    #[inline]
    pub(crate) fn advance(&mut self) {
        if self.offset < self.input.len() {
            self.offset += 1;
        }
    }

    /// Consumes and returns the next byte.
    #[inline]
    pub(crate) fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.offset += 1;
        Some(b)
    }

    /// Consumes the next byte if it equals `expected`.
    #[inline]
    pub(crate) fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the longest run of bytes matching `pred` and returns it.
    pub(crate) fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'src [u8] {
        let start = self.offset;
        let run = self.input[start..]
            .iter()
            .position(|&b| !pred(b))
            .unwrap_or(self.input.len() - start);
        self.offset += run;
        &self.input[start..self.offset]
    }

    /// Skips JSON whitespace: space, tab, line feed, carriage return.
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.offset += 1;
        }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Input between `start` and the current offset.
    pub(crate) fn slice_from(&self, start: usize) -> &'src [u8] {
        &self.input[start.min(self.offset)..self.offset]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// 1-based `(line, column)` of the current offset. Columns count bytes.
    pub(crate) fn location(&self) -> (usize, usize) {
        let consumed = &self.input[..self.offset];
        let line = 1 + consumed.iter().filter(|&&b| b == b'\n').count();
        let line_start = consumed
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);
        (line, self.offset - line_start + 1)
    }
}
