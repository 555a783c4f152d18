//! CLI command implementations.
//!
//! Every command first replays the input stream through the insertion
//! algorithm, then answers its query against the resulting log.

use crate::cli::output::{
    OutputFormat, format_message, format_messages, format_post_id, format_split, format_stats,
};
use crate::cli::parser::{Cli, Commands};
use crate::core::{Message, PostId, ServerTime};
use crate::error::{CommandError, Result};
use crate::io::read_events;
use crate::log::{ChronologicalMessages, LogEntry, Placement};
use regex::RegexBuilder;
use serde::Serialize;
use std::path::Path;

/// Executes the CLI command.
///
/// Returns the text to print on stdout.
///
/// # Errors
///
/// Returns an error if the input cannot be read or decoded, or if the
/// command refers to a post that is not in the log.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Replay {
            input,
            after,
            grep,
            ignore_case,
            newest_first,
            preview,
        } => cmd_replay(
            input,
            after.as_deref(),
            grep.as_deref(),
            *ignore_case,
            *newest_first,
            *preview,
            format,
        ),
        Commands::Find { input, id } => cmd_find(input, id, format),
        Commands::Next { input, from } => cmd_next(input, from.as_deref(), format),
        Commands::Prev { input, from } => cmd_prev(input, from.as_deref(), format),
        Commands::Split { input, id, preview } => cmd_split(input, id, *preview, format),
        Commands::Latest {
            input,
            author,
            editable,
        } => cmd_latest(input, author.as_deref(), *editable, format),
        Commands::Stats { input } => cmd_stats(input, format),
    }
}

/// Summary of a replayed stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogStats {
    /// Records read from the stream.
    pub events: usize,
    /// Messages kept in the log.
    pub messages: usize,
    /// Kept messages derived from server posts.
    pub posts: usize,
    /// Kept client-generated messages.
    pub client_messages: usize,
    /// Kept tombstones.
    pub deleted: usize,
    /// Kept posts awaiting confirmation.
    pub pending: usize,
    /// Records that arrived older than the newest message.
    pub out_of_order: usize,
    /// Records dropped as duplicates.
    pub duplicates: usize,
    /// Oldest message date.
    pub first_date: Option<ServerTime>,
    /// Newest message date.
    pub last_date: Option<ServerTime>,
}

/// A log together with the counters gathered while building it.
#[derive(Debug, Clone, Default)]
pub struct Replay {
    /// The resulting chronological log.
    pub log: ChronologicalMessages,
    /// Counters.
    pub stats: LogStats,
}

/// Reads the stream at `input` and folds every record into a fresh log.
///
/// # Errors
///
/// Returns an error if the stream cannot be read or a record cannot be
/// converted into a message.
pub fn replay(input: &Path) -> Result<Replay> {
    let events = read_events(input)?;
    let mut replay = Replay::default();
    replay.stats.events = events.len();

    for event in events {
        let message = event.into_message()?;
        match replay.log.insert(message) {
            Placement::Appended => {}
            Placement::Inserted(_) => replay.stats.out_of_order += 1,
            Placement::Duplicate => replay.stats.duplicates += 1,
        }
    }

    let stats = &mut replay.stats;
    for msg in &replay.log {
        stats.messages += 1;
        if msg.is_server_post() {
            stats.posts += 1;
        } else {
            stats.client_messages += 1;
        }
        stats.deleted += usize::from(msg.deleted);
        stats.pending += usize::from(msg.pending);
    }
    stats.first_date = replay.log.first().map(LogEntry::date);
    stats.last_date = replay.log.last().map(LogEntry::date);

    tracing::debug!(
        messages = stats.messages,
        out_of_order = stats.out_of_order,
        duplicates = stats.duplicates,
        "replayed event stream"
    );

    Ok(replay)
}

fn load_log(input: &Path) -> Result<ChronologicalMessages> {
    replay(input).map(|replay| replay.log)
}

// ==================== Command Implementations ====================

fn cmd_replay(
    input: &Path,
    after: Option<&str>,
    grep: Option<&str>,
    ignore_case: bool,
    newest_first: bool,
    preview: usize,
    format: OutputFormat,
) -> Result<String> {
    let mut log = load_log(input)?;

    if let Some(after) = after {
        let time: ServerTime = after.parse()?;
        log = log.messages_after(time);
    }

    if let Some(pattern) = grep {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()?;
        log = log.filter(|msg: &Message| regex.is_match(msg.text.as_str()));
    }

    if newest_first {
        Ok(format_messages(&log.reverse(), preview, format))
    } else {
        Ok(format_messages(&log, preview, format))
    }
}

fn cmd_find(input: &Path, id: &str, format: OutputFormat) -> Result<String> {
    let log = load_log(input)?;
    let msg = log
        .find_by_id(&PostId::new(id))
        .ok_or_else(|| CommandError::PostNotFound { id: id.to_string() })?;
    Ok(format_message(msg, format))
}

fn cmd_next(input: &Path, from: Option<&str>, format: OutputFormat) -> Result<String> {
    let log = load_log(input)?;
    let from = parse_from(from)?;
    Ok(format_post_id(log.next_id(from.as_ref()), format))
}

fn cmd_prev(input: &Path, from: Option<&str>, format: OutputFormat) -> Result<String> {
    let log = load_log(input)?;
    let from = parse_from(from)?;
    Ok(format_post_id(log.previous_id(from.as_ref()), format))
}

fn cmd_split(input: &Path, id: &str, preview: usize, format: OutputFormat) -> Result<String> {
    let log = load_log(input)?;
    let split = log.split_at(Some(&PostId::new(id)));
    if split.found.is_none() {
        return Err(CommandError::PostNotFound { id: id.to_string() }.into());
    }
    Ok(format_split(&split, preview, format))
}

fn cmd_latest(
    input: &Path,
    author: Option<&str>,
    editable: bool,
    format: OutputFormat,
) -> Result<String> {
    let log = load_log(input)?;
    let found = log.latest_matching(|msg: &Message| {
        (!editable || msg.is_editable())
            && author.is_none_or(|name| msg.user_name.as_deref() == Some(name))
    });
    match found {
        Some(msg) => Ok(format_message(msg, format)),
        None => Ok(format_post_id(None, format)),
    }
}

fn cmd_stats(input: &Path, format: OutputFormat) -> Result<String> {
    let replay = replay(input)?;
    Ok(format_stats(&replay.stats, format))
}

/// Validates an optional `--from` id.
fn parse_from(from: Option<&str>) -> Result<Option<PostId>> {
    match from {
        Some("") => Err(CommandError::InvalidArgument("--from must not be empty".to_string()).into()),
        Some(id) => Ok(Some(PostId::new(id))),
        None => Ok(None),
    }
}
