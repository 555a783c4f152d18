//! Event stream reading.
//!
//! Streams are newline-delimited JSON, one [`Event`] per line. Blank lines
//! and lines starting with `#` are skipped so fixtures can carry comments.

use crate::core::Event;
use crate::error::{InputError, IoError, Result};
use std::io::Read;
use std::path::Path;

/// Path that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Parses an NDJSON event stream.
///
/// # Errors
///
/// Returns [`InputError::Parse`] with the 1-based line number of the first
/// malformed record.
///
/// # Examples
///
/// ```
/// use chanlog::io::parse_events;
///
/// let events = parse_events(
///     "# fixture\n{\"kind\":\"post\",\"id\":\"a\",\"create_at\":1}\n\n",
/// ).unwrap();
/// assert_eq!(events.len(), 1);
/// ```
pub fn parse_events(content: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(line).map_err(|e| InputError::Parse {
            line: index + 1,
            reason: e.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Reads and parses an event stream from a file, or from stdin for `-`.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or holds a
/// malformed record.
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let content = read_source(path)?;
    let events = parse_events(&content)?;
    tracing::debug!(path = %path.display(), events = events.len(), "loaded event stream");
    Ok(events)
}

fn read_source(path: &Path) -> Result<String> {
    let path_str = path.to_string_lossy().to_string();

    if path_str == STDIN_PATH {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| IoError::ReadFailed {
                path: path_str,
                reason: e.to_string(),
            })?;
        return Ok(content);
    }

    if !path.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    std::fs::read_to_string(path).map_err(|e| {
        IoError::ReadFailed {
            path: path_str,
            reason: e.to_string(),
        }
        .into()
    })
}
