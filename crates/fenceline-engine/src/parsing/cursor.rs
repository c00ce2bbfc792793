/// Forward-only byte position for scanners that hop between delimiters
/// rather than walking whole lines.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            at: 0,
        }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.at
    }

    pub fn eof(&self) -> bool {
        self.at >= self.bytes.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.at).copied()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.at += 1;
        Some(b)
    }

    /// Moves to `pos`, clamped to the end. Never moves backwards.
    pub fn seek(&mut self, pos: usize) {
        self.at = self.at.max(pos.min(self.bytes.len()));
    }

    /// First offset in `pos()..limit` where `pred` holds, giving up at the
    /// first `stop` byte. The cursor itself does not move.
    pub fn find_before(
        &self,
        limit: usize,
        stop: u8,
        mut pred: impl FnMut(usize) -> bool,
    ) -> Option<usize> {
        let limit = limit.min(self.bytes.len());
        (self.at..limit)
            .take_while(|&j| self.bytes[j] != stop)
            .find(|&j| pred(j))
    }
}
