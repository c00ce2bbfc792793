use std::sync::OnceLock;

use regex::Regex;

/// What a single line looks like with respect to code fences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceSig<'a> {
    /// ```` ```{python} ```` or ```` ```{.r echo=false} ````: dispatchable.
    Interactive { run: usize, language: &'a str },
    /// ```` ```python ````: highlighted only.
    Passive { run: usize, language: &'a str },
    /// A backtick run with nothing after it. Only ever closes a block.
    Bare { run: usize },
}

impl FenceSig<'_> {
    pub fn run(&self) -> usize {
        match *self {
            FenceSig::Interactive { run, .. }
            | FenceSig::Passive { run, .. }
            | FenceSig::Bare { run } => run,
        }
    }
}

/// Code fence syntax knowledge: delimiter glyph and opener/closer line shapes.
pub struct CodeFence;

impl CodeFence {
    pub const TICK: char = '`';
    pub const MIN_RUN: usize = 3;

    fn interactive_re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r"^(`{3,})\{\s*\.?([^\s,}]+)[^}]*\}\s*$")
                .expect("Invalid interactive fence regex")
        })
    }

    fn passive_re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r"^(`{3,})([A-Za-z0-9][\w+#.-]*)(?:\s.*)?$")
                .expect("Invalid passive fence regex")
        })
    }

    fn bare_re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^(`{3,})\s*$").expect("Invalid bare fence regex"))
    }

    /// Classifies a line (without terminator) as a fence line, if it is one.
    pub fn sig(line: &str) -> Option<FenceSig<'_>> {
        if !line.starts_with(Self::TICK) {
            return None;
        }
        if let Some(c) = Self::interactive_re().captures(line) {
            return Some(FenceSig::Interactive {
                run: c[1].len(),
                language: c.get(2).map_or("", |m| m.as_str()),
            });
        }
        if let Some(c) = Self::passive_re().captures(line) {
            return Some(FenceSig::Passive {
                run: c[1].len(),
                language: c.get(2).map_or("", |m| m.as_str()),
            });
        }
        Self::bare_re()
            .captures(line)
            .map(|c| FenceSig::Bare { run: c[1].len() })
    }

    /// A block opened with `open_run` backticks is closed by a bare run at least as long.
    pub fn closes(open_run: usize, sig: Option<FenceSig<'_>>) -> bool {
        matches!(sig, Some(FenceSig::Bare { run }) if run >= open_run)
    }
}
