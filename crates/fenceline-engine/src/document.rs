use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::locate::block_at;
use crate::parsing::{CodeBlock, Scan, ScanOptions, Span, scan_document_with};

/// A buffer edit. Offsets are bytes into the current text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert { at: usize, text: String },
    Delete { range: std::ops::Range<usize> },
    Replace { range: std::ops::Range<usize>, text: String },
}

/// Result of applying an [`Edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// Bytes of the new text written by the edit (empty for deletions).
    pub changed: Span,
    pub revision: u64,
}

struct Cached {
    text: String,
    scan: Scan,
}

/// Editable document text with a per-revision structural scan.
///
/// The text lives in an `xi_rope::Rope`. Every edit bumps `revision` and drops
/// the cached scan; the next call to [`Document::scan`] rescans the whole text.
/// Results are never patched incrementally, so a scan always agrees with a
/// fresh `scan_document_with` over the same text.
pub struct Document {
    buffer: Rope,
    revision: u64,
    options: ScanOptions,
    cache: Option<Cached>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self::with_options(text, ScanOptions::default())
    }

    pub fn with_options(text: &str, options: ScanOptions) -> Self {
        Self {
            buffer: Rope::from(text),
            revision: 0,
            options,
            cache: None,
        }
    }

    /// Builds a document from raw file bytes, rejecting invalid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, std::str::Utf8Error> {
        Ok(Self::new(std::str::from_utf8(bytes)?))
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    /// Changes scan options; the next scan uses them.
    pub fn set_options(&mut self, options: ScanOptions) {
        if options != self.options {
            self.options = options;
            self.cache = None;
        }
    }

    pub fn insert(&mut self, at: usize, text: &str) -> Applied {
        self.apply(Edit::Insert {
            at,
            text: text.to_string(),
        })
    }

    pub fn delete(&mut self, range: std::ops::Range<usize>) -> Applied {
        self.apply(Edit::Delete { range })
    }

    pub fn replace(&mut self, range: std::ops::Range<usize>, text: &str) -> Applied {
        self.apply(Edit::Replace {
            range,
            text: text.to_string(),
        })
    }

    /// Applies an edit. Out-of-range or mid-character offsets are pulled back
    /// to the nearest valid position rather than rejected.
    pub fn apply(&mut self, edit: Edit) -> Applied {
        let (delta, changed) = self.compile(&edit);
        self.buffer = delta.apply(&self.buffer);
        self.revision += 1;
        self.cache = None;
        log::trace!("applied {edit:?} -> revision {}", self.revision);
        Applied {
            changed,
            revision: self.revision,
        }
    }

    fn compile(&self, edit: &Edit) -> (Delta<RopeInfo>, Span) {
        let mut builder = Builder::new(self.len());
        let changed = match edit {
            Edit::Insert { at, text } => {
                let at = self.clamp(*at);
                builder.replace(at..at, Rope::from(text.as_str()));
                Span::new(at, at + text.len())
            }
            Edit::Delete { range } => {
                let range = self.clamp_range(range);
                let start = range.start;
                builder.delete(range);
                Span::new(start, start)
            }
            Edit::Replace { range, text } => {
                let range = self.clamp_range(range);
                let start = range.start;
                builder.replace(range, Rope::from(text.as_str()));
                Span::new(start, start + text.len())
            }
        };
        (builder.build(), changed)
    }

    fn clamp(&self, offset: usize) -> usize {
        let mut at = offset.min(self.len());
        while at > 0 && !self.buffer.is_codepoint_boundary(at) {
            at -= 1;
        }
        at
    }

    fn clamp_range(&self, range: &std::ops::Range<usize>) -> std::ops::Range<usize> {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end).max(start);
        start..end
    }

    /// Scan of the current revision, computed on first use after an edit.
    pub fn scan(&mut self) -> &Scan {
        &self.scanned().1
    }

    /// Flattened text and scan of the current revision.
    pub fn scanned(&mut self) -> (&str, &Scan) {
        let options = self.options;
        let buffer = &self.buffer;
        let cached = self.cache.get_or_insert_with(|| {
            let text = buffer.to_string();
            let scan = scan_document_with(&text, options);
            Cached { text, scan }
        });
        (&cached.text, &cached.scan)
    }

    /// Code block containing `offset`, inclusive at both ends.
    pub fn block_at(&mut self, offset: usize) -> Option<&CodeBlock> {
        block_at(&self.scan().code_blocks, offset)
    }

    pub fn slice(&self, span: Span) -> String {
        let start = self.clamp(span.start);
        let end = self.clamp(span.end).max(start);
        self.buffer.slice_to_cow(start..end).into_owned()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.len())
            .field("revision", &self.revision)
            .field("options", &self.options)
            .field("scanned", &self.cache.is_some())
            .finish()
    }
}
