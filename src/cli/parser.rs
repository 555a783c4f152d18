//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chanlog: replay a channel's event stream and navigate the resulting log.
///
/// Input is newline-delimited JSON, one post or client event per line.
/// Use `-` to read from stdin.
#[derive(Parser, Debug)]
#[command(name = "chanlog")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json, ndjson).
    #[arg(long, default_value = "text", global = true, env = "CHANLOG_FORMAT")]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay the stream and print the resulting log.
    Replay {
        /// Event stream path (`-` for stdin).
        input: PathBuf,

        /// Only show messages dated strictly after this time
        /// (epoch milliseconds or RFC 3339).
        #[arg(long)]
        after: Option<String>,

        /// Only show messages whose text matches this regex.
        #[arg(short, long)]
        grep: Option<String>,

        /// Case-insensitive `--grep`.
        #[arg(short, long)]
        ignore_case: bool,

        /// Print newest messages first.
        #[arg(long)]
        newest_first: bool,

        /// Maximum preview width in characters.
        #[arg(long, default_value = "80")]
        preview: usize,
    },

    /// Show the message with the given post id.
    Find {
        /// Event stream path (`-` for stdin).
        input: PathBuf,

        /// Post id to look up.
        id: String,
    },

    /// Print the id of the next post after `--from` (or the latest post).
    Next {
        /// Event stream path (`-` for stdin).
        input: PathBuf,

        /// Starting post id.
        #[arg(long)]
        from: Option<String>,
    },

    /// Print the id of the post before `--from` (or the latest post).
    #[command(alias = "previous")]
    Prev {
        /// Event stream path (`-` for stdin).
        input: PathBuf,

        /// Starting post id.
        #[arg(long)]
        from: Option<String>,
    },

    /// Split the log around a post.
    Split {
        /// Event stream path (`-` for stdin).
        input: PathBuf,

        /// Post id to split at.
        id: String,

        /// Maximum preview width in characters.
        #[arg(long, default_value = "80")]
        preview: usize,
    },

    /// Show the latest post matching the filters.
    Latest {
        /// Event stream path (`-` for stdin).
        input: PathBuf,

        /// Only posts by this author.
        #[arg(short, long)]
        author: Option<String>,

        /// Only posts that could be edited (normal posts and emotes).
        #[arg(short, long)]
        editable: bool,
    },

    /// Summarize the replayed log.
    Stats {
        /// Event stream path (`-` for stdin).
        input: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_replay_flags() {
        let cli = Cli::parse_from([
            "chanlog",
            "--format",
            "json",
            "replay",
            "events.ndjson",
            "--after",
            "15",
            "--newest-first",
        ]);
        assert_eq!(cli.format, "json");
        match cli.command {
            Commands::Replay {
                after,
                newest_first,
                preview,
                ..
            } => {
                assert_eq!(after.as_deref(), Some("15"));
                assert!(newest_first);
                assert_eq!(preview, 80);
            }
            other => unreachable!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_prev_alias() {
        let cli = Cli::parse_from(["chanlog", "previous", "-", "--from", "abc"]);
        assert!(matches!(cli.command, Commands::Prev { from: Some(ref id), .. } if id == "abc"));
    }
}
