use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io::Write;
use std::process::{Child, Command, Stdio};

use fenceline_engine::{DispatchError, DispatchRequest, SessionSink};

/// One interpreter process per language, fed through its stdin.
///
/// Processes are started lazily by the first request for their language and
/// share the terminal's stdout/stderr.
#[derive(Default)]
pub struct ProcessSessions {
    children: BTreeMap<String, Child>,
}

impl ProcessSessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn(request: &DispatchRequest) -> Result<Child, DispatchError> {
        log::debug!("starting `{}` for {}", request.command, request.language);
        Command::new("sh")
            .arg("-c")
            .arg(&request.command)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| DispatchError::Session {
                language: request.language.clone(),
                source,
            })
    }

    /// Closes every session's stdin and waits for all of them to exit,
    /// then reports the first that failed.
    pub fn finish(mut self) -> Result<(), DispatchError> {
        let mut first_err = None;
        for (language, mut child) in std::mem::take(&mut self.children) {
            drop(child.stdin.take());
            let err = match child.wait() {
                Ok(status) if status.success() => continue,
                Ok(status) => std::io::Error::other(format!("session exited with {status}")),
                Err(source) => source,
            };
            log::warn!("{language} session failed: {err}");
            first_err.get_or_insert(DispatchError::Session {
                language,
                source: err,
            });
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl SessionSink for ProcessSessions {
    fn send(&mut self, request: &DispatchRequest) -> Result<(), DispatchError> {
        let child = match self.children.entry(request.language.clone()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(Self::spawn(request)?),
        };

        let session_err = |source| DispatchError::Session {
            language: request.language.clone(),
            source,
        };
        let stdin = child
            .stdin
            .as_mut()
            .ok_or_else(|| session_err(std::io::Error::other("session stdin closed")))?;
        stdin.write_all(request.text.as_bytes()).map_err(session_err)?;
        stdin.write_all(b"\n").map_err(session_err)?;
        stdin.flush().map_err(session_err)
    }
}

impl Drop for ProcessSessions {
    fn drop(&mut self) {
        for child in self.children.values_mut() {
            drop(child.stdin.take());
            let _ = child.wait();
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use fenceline_engine::dispatch;
    use tempfile::TempDir;

    fn request(language: &str, command: &str, text: &str) -> DispatchRequest {
        DispatchRequest {
            language: language.into(),
            command: command.into(),
            text: text.into(),
            blocks: 1,
        }
    }

    #[test]
    fn sends_to_a_shell_session() {
        let mut sessions = ProcessSessions::new();
        let sent = dispatch(
            &mut sessions,
            vec![request("bash", "cat > /dev/null", "echo hi")],
        )
        .unwrap();
        assert_eq!(sent, 1);
        sessions.finish().unwrap();
    }

    #[test]
    fn failing_session_reports_language() {
        let mut sessions = ProcessSessions::new();
        sessions
            .send(&request("bash", "cat > /dev/null; exit 3", "x"))
            .unwrap();
        let err = sessions.finish().unwrap_err();
        assert!(err.to_string().contains("bash"), "{err}");
    }

    #[test]
    fn every_session_is_waited_on_before_reporting() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("late");

        let mut sessions = ProcessSessions::new();
        sessions
            .send(&request("a", "cat > /dev/null; exit 1", "x"))
            .unwrap();
        let late = format!("cat > /dev/null; sleep 0.2; touch '{}'", marker.display());
        sessions.send(&request("b", &late, "y")).unwrap();

        let err = sessions.finish().unwrap_err();
        assert!(matches!(err, DispatchError::Session { ref language, .. } if language == "a"));
        assert!(marker.exists());
    }
}
