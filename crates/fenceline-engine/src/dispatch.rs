//! Planning and sending code to language sessions.
//!
//! Planning is pure: it turns a scan plus a position into [`DispatchRequest`]s.
//! Sending goes through a [`SessionSink`] the caller provides, so the engine
//! never spawns processes itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::{Region, aggregate_by};
use crate::locate::block_at;
use crate::parsing::{Scan, text::slice};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no session command configured for language '{language}'")]
    UnknownLanguage { language: String },

    #[error("session for '{language}' failed: {source}")]
    Session {
        language: String,
        source: std::io::Error,
    },
}

/// Language alias table and the session command for each canonical language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Languages {
    /// Tag as written -> canonical language name.
    pub aliases: BTreeMap<String, String>,
    /// Canonical language name -> command that starts a session reading stdin.
    pub commands: BTreeMap<String, String>,
}

impl Default for Languages {
    fn default() -> Self {
        let pairs = |items: &[(&str, &str)]| {
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>()
        };
        Self {
            aliases: pairs(&[
                ("py", "python"),
                ("r", "R"),
                ("jl", "julia"),
                ("sh", "bash"),
                ("js", "node"),
            ]),
            commands: pairs(&[
                ("python", "python3 -i"),
                ("R", "R --no-save --quiet"),
                ("julia", "julia"),
                ("bash", "bash"),
                ("node", "node"),
            ]),
        }
    }
}

impl Languages {
    /// Resolves a fence tag to its canonical language name.
    ///
    /// Matching is case-insensitive. When the result names an entry in the
    /// command table, that entry's spelling is returned.
    pub fn canonical(&self, tag: &str) -> String {
        let lower = tag.to_lowercase();
        let resolved = self
            .aliases
            .iter()
            .find(|(alias, _)| alias.to_lowercase() == lower)
            .map(|(_, name)| name.as_str())
            .unwrap_or(lower.as_str());

        self.commands
            .keys()
            .find(|name| name.to_lowercase() == resolved.to_lowercase())
            .cloned()
            .unwrap_or_else(|| resolved.to_string())
    }

    /// Session command for a canonical language name.
    pub fn command(&self, canonical: &str) -> Option<&str> {
        self.commands.get(canonical).map(String::as_str)
    }

    fn resolve(&self, tag: &str) -> Result<(String, String), DispatchError> {
        let language = self.canonical(tag);
        match self.command(&language) {
            Some(command) => {
                let command = command.to_string();
                Ok((language, command))
            }
            None => Err(DispatchError::UnknownLanguage { language }),
        }
    }
}

/// Code ready to be sent to one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRequest {
    /// Canonical language name.
    pub language: String,
    pub command: String,
    pub text: String,
    /// Number of code blocks joined into `text`.
    pub blocks: usize,
}

/// Plans sending the interactive block at `offset`.
///
/// Returns `Ok(None)` when the offset is not inside an interactive block.
pub fn plan_at(
    text: &str,
    scan: &Scan,
    offset: usize,
    languages: &Languages,
) -> Result<Option<DispatchRequest>, DispatchError> {
    let Some(block) = block_at(scan.interactive_blocks(), offset) else {
        log::debug!("no interactive block at offset {offset}");
        return Ok(None);
    };
    let (language, command) = languages.resolve(&block.language)?;
    Ok(Some(DispatchRequest {
        language,
        command,
        text: slice(text, block.inner).to_string(),
        blocks: 1,
    }))
}

/// Plans sending every interactive block in `region`, one request per
/// canonical language in first-seen order.
///
/// All languages are resolved before anything is returned; a single unknown
/// language fails the whole plan.
pub fn plan_region(
    text: &str,
    scan: &Scan,
    region: Region,
    languages: &Languages,
) -> Result<Vec<DispatchRequest>, DispatchError> {
    let groups = aggregate_by(text, scan.interactive_blocks(), region, |b| {
        languages.canonical(&b.language)
    });

    groups
        .groups
        .into_iter()
        .map(|g| {
            let (language, command) = languages.resolve(&g.language)?;
            Ok(DispatchRequest {
                language,
                command,
                text: g.text,
                blocks: g.count,
            })
        })
        .collect()
}

/// Something that can evaluate code for a language, usually a REPL process.
pub trait SessionSink {
    fn send(&mut self, request: &DispatchRequest) -> Result<(), DispatchError>;
}

/// Sends requests in order, stopping at the first failure.
///
/// Returns the number of requests sent.
pub fn dispatch<S, I>(sink: &mut S, requests: I) -> Result<usize, DispatchError>
where
    S: SessionSink + ?Sized,
    I: IntoIterator<Item = DispatchRequest>,
{
    let mut sent = 0;
    for request in requests {
        log::info!(
            "sending {} block(s) of {} to `{}`",
            request.blocks,
            request.language,
            request.command
        );
        sink.send(&request)?;
        sent += 1;
    }
    Ok(sent)
}
