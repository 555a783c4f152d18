//! Output formatting for CLI commands.
//!
//! Supports text, pretty JSON and newline-delimited JSON output formats.

use crate::cli::commands::LogStats;
use crate::core::{Message, PostId, ReplyState};
use crate::error::Error;
use crate::io::preview;
use crate::log::Split;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Pretty-printed JSON output.
    Json,
    /// One compact JSON value per line.
    Ndjson,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "ndjson" | "jsonl" => Self::Ndjson,
            _ => Self::Text,
        }
    }
}

/// Formats a run of messages, one per line in text mode.
#[must_use]
pub fn format_messages<'a, I>(messages: I, preview_len: usize, format: OutputFormat) -> String
where
    I: IntoIterator<Item = &'a Message>,
{
    let messages: Vec<&Message> = messages.into_iter().collect();
    match format {
        OutputFormat::Text => {
            if messages.is_empty() {
                return "No messages.\n".to_string();
            }
            let mut output = String::new();
            for msg in messages {
                output.push_str(&message_line(msg, preview_len));
                output.push('\n');
            }
            output
        }
        OutputFormat::Json => format_json(&messages),
        OutputFormat::Ndjson => {
            let mut output = String::new();
            for msg in messages {
                output.push_str(&format_json_line(msg));
            }
            output
        }
    }
}

/// Formats a single message with all of its details.
#[must_use]
pub fn format_message(msg: &Message, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_message_text(msg),
        OutputFormat::Json => format_json(msg),
        OutputFormat::Ndjson => format_json_line(msg),
    }
}

fn format_message_text(msg: &Message) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Message: {}",
        msg.post_id.as_ref().map_or("-", PostId::as_str)
    );
    let _ = writeln!(output, "  Date:        {}", msg.date);
    let _ = writeln!(output, "  Type:        {}", type_label(msg));
    if let Some(ref author) = msg.user_name {
        let _ = writeln!(output, "  Author:      {author}");
    }
    if let Some(ref channel) = msg.channel_id {
        let _ = writeln!(output, "  Channel:     {channel}");
    }
    if let ReplyState::InReplyTo(ref parent) = msg.reply_state {
        let _ = writeln!(output, "  Reply to:    {parent}");
    }
    if msg.deleted {
        output.push_str("  Deleted:     yes\n");
    }
    if msg.pending {
        output.push_str("  Pending:     yes\n");
    }
    if msg.flagged {
        output.push_str("  Flagged:     yes\n");
    }
    if !msg.attachments.is_empty() {
        let names: Vec<&str> = msg.attachments.iter().map(|a| a.name.as_str()).collect();
        let _ = writeln!(output, "  Attachments: {}", names.join(", "));
    }
    if !msg.reactions.is_empty() {
        let reactions: Vec<String> = msg
            .reactions
            .iter()
            .map(|(name, count)| format!("{name}×{count}"))
            .collect();
        let _ = writeln!(output, "  Reactions:   {}", reactions.join(" "));
    }
    output.push_str("---\n");
    output.push_str(msg.text.as_str());
    if !msg.text.as_str().ends_with('\n') {
        output.push('\n');
    }
    output
}

/// Formats an optional post id (navigation results).
#[must_use]
pub fn format_post_id(id: Option<&PostId>, format: OutputFormat) -> String {
    #[derive(Serialize)]
    struct IdOutput<'a> {
        id: Option<&'a PostId>,
    }

    match format {
        OutputFormat::Text => id.map_or_else(|| "(none)\n".to_string(), |id| format!("{id}\n")),
        OutputFormat::Json => format_json(&IdOutput { id }),
        OutputFormat::Ndjson => format_json_line(&IdOutput { id }),
    }
}

/// Formats the halves of a split log.
#[must_use]
pub fn format_split(split: &Split<Message>, preview_len: usize, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Before ({}, newest first):", split.before.len());
            for msg in &split.before {
                let _ = writeln!(output, "  {}", message_line(msg, preview_len));
            }
            match split.found {
                Some(ref msg) => {
                    let _ = writeln!(output, "> {}", message_line(msg, preview_len));
                }
                None => output.push_str("> (not found)\n"),
            }
            let _ = writeln!(output, "After ({}):", split.after.len());
            for msg in &split.after {
                let _ = writeln!(output, "  {}", message_line(msg, preview_len));
            }
            output
        }
        OutputFormat::Json | OutputFormat::Ndjson => {
            #[derive(Serialize)]
            struct SplitOutput<'a> {
                found: Option<&'a Message>,
                before: &'a crate::log::RetrogradeMessages,
                after: &'a crate::log::ChronologicalMessages,
            }
            let value = SplitOutput {
                found: split.found.as_ref(),
                before: &split.before,
                after: &split.after,
            };
            if format == OutputFormat::Json {
                format_json(&value)
            } else {
                format_json_line(&value)
            }
        }
    }
}

/// Formats a log summary.
#[must_use]
pub fn format_stats(stats: &LogStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str("Channel Log\n");
            output.push_str("===========\n\n");
            let _ = writeln!(output, "  Events read:       {}", stats.events);
            let _ = writeln!(output, "  Messages:          {}", stats.messages);
            let _ = writeln!(output, "  Posts:             {}", stats.posts);
            let _ = writeln!(output, "  Client messages:   {}", stats.client_messages);
            let _ = writeln!(output, "  Deleted:           {}", stats.deleted);
            let _ = writeln!(output, "  Pending:           {}", stats.pending);
            let _ = writeln!(output, "  Out of order:      {}", stats.out_of_order);
            let _ = writeln!(output, "  Duplicates:        {}", stats.duplicates);
            if let (Some(first), Some(last)) = (stats.first_date, stats.last_date) {
                let _ = writeln!(output, "  Span:              {first} .. {last}");
            }
            output
        }
        OutputFormat::Json => format_json(stats),
        OutputFormat::Ndjson => format_json_line(stats),
    }
}

/// Formats an error for the chosen output format.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    #[derive(Serialize)]
    struct ErrorOutput<'a> {
        error: &'a str,
        message: String,
    }

    let kind = match err {
        Error::Input(_) => "input",
        Error::Io(_) => "io",
        Error::Command(_) => "command",
    };
    let value = ErrorOutput {
        error: kind,
        message: err.to_string(),
    };

    match format {
        OutputFormat::Text => err.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| format!("{{\"error\":\"{kind}\"}}")),
        OutputFormat::Ndjson => serde_json::to_string(&value)
            .unwrap_or_else(|_| format!("{{\"error\":\"{kind}\"}}")),
    }
}

/// One-line rendering used by list outputs.
fn message_line(msg: &Message, preview_len: usize) -> String {
    let id = msg.post_id.as_ref().map_or("-", PostId::as_str);
    let author = msg
        .user_name
        .as_deref()
        .unwrap_or(if msg.is_client_generated() { "*" } else { "?" });

    let mut tags = String::new();
    if msg.deleted {
        tags.push_str("[deleted] ");
    }
    if msg.pending {
        tags.push_str("[pending] ");
    }
    if msg.flagged {
        tags.push_str("[flagged] ");
    }
    if let ReplyState::InReplyTo(ref parent) = msg.reply_state {
        let _ = write!(tags, "[re {}] ", preview(parent.as_str(), 8));
    }

    let body = if msg.is_emote() {
        format!("* {author} {}", msg.text)
    } else {
        msg.text.to_string()
    };

    format!(
        "{}  {:<10} {:<12} {tags}{}",
        msg.date,
        preview(id, 10),
        preview(author, 12),
        preview(&body, preview_len)
    )
}

fn type_label(msg: &Message) -> String {
    serde_json::to_value(msg.kind)
        .ok()
        .and_then(|v| {
            v.as_object()
                .and_then(|o| o.iter().next())
                .map(|(k, v)| format!("{k}/{}", v.as_str().unwrap_or("?")))
        })
        .unwrap_or_else(|| "?".to_string())
}

/// Formats a value as pretty JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    let mut output = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    output.push('\n');
    output
}

/// Formats a value as one compact JSON line.
fn format_json_line<T: Serialize + ?Sized>(value: &T) -> String {
    let mut output = serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string());
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClientMessageType, MessageType, PostType, ServerTime};
    use crate::error::CommandError;
    use crate::log::ChronologicalMessages;

    fn post(millis: i64, id: &str, text: &str) -> Message {
        let mut m = Message::new(
            text.into(),
            MessageType::Post(PostType::Normal),
            ServerTime::from_millis(millis).unwrap(),
        );
        m.post_id = Some(PostId::new(id));
        m.user_name = Some("alice".to_string());
        m
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("ndjson"), OutputFormat::Ndjson);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("unknown"), OutputFormat::Text);
    }

    #[test]
    fn test_message_line() {
        let mut msg = post(0, "abc", "hello\nworld");
        msg.deleted = true;
        let line = message_line(&msg, 80);
        assert!(line.starts_with("1970-01-01T00:00:00.000Z"));
        assert!(line.contains("abc"));
        assert!(line.contains("alice"));
        assert!(line.contains("[deleted] hello world"));
    }

    #[test]
    fn test_message_line_client_and_emote() {
        let marker = Message::new(
            "Today".into(),
            MessageType::Client(ClientMessageType::DateTransition),
            ServerTime::from_millis(0).unwrap(),
        );
        assert!(message_line(&marker, 80).contains(" *  "));

        let mut emote = post(0, "e", "waves");
        emote.kind = MessageType::Post(PostType::Emote);
        assert!(message_line(&emote, 80).contains("* alice waves"));
    }

    #[test]
    fn test_format_messages_empty() {
        let none: Vec<Message> = Vec::new();
        assert_eq!(format_messages(&none, 80, OutputFormat::Text), "No messages.\n");
        assert_eq!(format_messages(&none, 80, OutputFormat::Json), "[]\n");
        assert_eq!(format_messages(&none, 80, OutputFormat::Ndjson), "");
    }

    #[test]
    fn test_format_messages_ndjson() {
        let log: ChronologicalMessages = [post(1, "a", "x"), post(2, "b", "y")]
            .into_iter()
            .collect();
        let output = format_messages(&log, 80, OutputFormat::Ndjson);
        assert_eq!(output.lines().count(), 2);
        for line in output.lines() {
            assert!(serde_json::from_str::<Message>(line).is_ok());
        }
    }

    #[test]
    fn test_format_post_id() {
        let id = PostId::new("abc");
        assert_eq!(format_post_id(Some(&id), OutputFormat::Text), "abc\n");
        assert_eq!(format_post_id(None, OutputFormat::Text), "(none)\n");
        assert_eq!(format_post_id(None, OutputFormat::Ndjson), "{\"id\":null}\n");
    }

    #[test]
    fn test_format_message_text() {
        let mut msg = post(0, "abc", "body");
        msg.reactions.insert("smile".to_string(), 3);
        let text = format_message(&msg, OutputFormat::Text);
        assert!(text.contains("Message: abc"));
        assert!(text.contains("Type:        post/normal"));
        assert!(text.contains("smile×3"));
        assert!(text.ends_with("body\n"));
    }

    #[test]
    fn test_format_split_json() {
        let log: ChronologicalMessages = [post(1, "a", "x"), post(2, "b", "y"), post(3, "c", "z")]
            .into_iter()
            .collect();
        let split = log.split_at(Some(&PostId::new("b")));
        let json: serde_json::Value =
            serde_json::from_str(&format_split(&split, 80, OutputFormat::Json)).unwrap();
        assert_eq!(json["found"]["post_id"], "b");
        assert_eq!(json["before"][0]["post_id"], "a");
        assert_eq!(json["after"][0]["post_id"], "c");
    }

    #[test]
    fn test_format_stats() {
        let stats = LogStats {
            events: 4,
            messages: 3,
            posts: 2,
            client_messages: 1,
            deleted: 0,
            pending: 0,
            out_of_order: 1,
            duplicates: 1,
            first_date: None,
            last_date: None,
        };
        let text = format_stats(&stats, OutputFormat::Text);
        assert!(text.contains("Messages:          3"));
        assert!(text.contains("Duplicates:        1"));

        let json = format_stats(&stats, OutputFormat::Json);
        assert!(json.contains("\"duplicates\": 1"));
    }

    #[test]
    fn test_format_error() {
        let err: Error = CommandError::PostNotFound {
            id: "zz".to_string(),
        }
        .into();
        assert_eq!(
            format_error(&err, OutputFormat::Text),
            "command error: post not found: zz"
        );
        let json: serde_json::Value =
            serde_json::from_str(&format_error(&err, OutputFormat::Json)).unwrap();
        assert_eq!(json["error"], "command");
    }
}
