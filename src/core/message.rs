//! Message representation for chanlog.
//!
//! A [`Message`] is one displayable event in a channel's log. It is either
//! derived from a server post (and then carries a [`PostId`]) or generated
//! locally by the client (date markers, the "new messages" marker, local
//! errors and so on), in which case it has no identity and no author.

use crate::core::ids::{ChannelId, PostId};
use crate::core::time::ServerTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Already-parsed message body.
///
/// The log never looks inside this value; rendering collaborators do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(String);

impl RichText {
    /// Wraps a parsed body.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the body source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Kinds of message the client synthesizes itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientMessageType {
    /// Informational notice produced locally.
    #[default]
    Informative,
    /// Local error report.
    Error,
    /// Marker separating two calendar days.
    DateTransition,
    /// Marker placed before the first unread message.
    NewMessagesTransition,
    /// Marker for history not yet fetched before a message.
    UnknownGapBefore,
    /// Marker for history not yet fetched after a message.
    UnknownGapAfter,
}

/// Kinds of server post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    /// Ordinary user post.
    #[default]
    Normal,
    /// `/me` style emote.
    Emote,
    /// A user joined the channel.
    Join,
    /// A user left the channel.
    Leave,
    /// The channel header or purpose changed.
    TopicChange,
    /// Any other server-generated notice.
    System,
}

/// Message type: client-generated or a server post, with its subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Synthesized locally.
    Client(ClientMessageType),
    /// Derived from a server post.
    Post(PostType),
}

/// Whether a message replies to another post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyState {
    /// Top-level message.
    #[default]
    NotAReply,
    /// Reply to the post with this identity.
    InReplyTo(PostId),
}

/// File attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    /// Server file identity.
    pub file_id: String,
    /// Display name of the file.
    #[serde(default)]
    pub name: String,
}

/// A single displayable event in a channel's log.
///
/// Deleted posts are kept as tombstones (`deleted == true`) so that order
/// and reply links around them stay stable.
///
/// # Examples
///
/// ```
/// use chanlog::core::{ClientMessageType, Message, MessageType, ServerTime};
///
/// let marker = Message::new(
///     "Today".into(),
///     MessageType::Client(ClientMessageType::DateTransition),
///     ServerTime::from_millis(0).unwrap(),
/// );
/// assert!(marker.post_id.is_none());
/// assert!(!marker.is_deletable());
/// assert!(marker.is_date_transition());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Parsed body.
    pub text: RichText,

    /// Author display name; absent for client-generated messages.
    pub user_name: Option<String>,

    /// Ordering key.
    pub date: ServerTime,

    /// Client-generated or server post, with subtype.
    #[serde(rename = "type")]
    pub kind: MessageType,

    /// Outbound post still waiting for server confirmation.
    pub pending: bool,

    /// The underlying post was removed.
    pub deleted: bool,

    /// Attached files, in server order.
    pub attachments: Vec<Attachment>,

    /// Parent post, if this is a reply.
    pub reply_state: ReplyState,

    /// Server identity; present iff this message came from a server post.
    pub post_id: Option<PostId>,

    /// Reaction name to count.
    pub reactions: BTreeMap<String, usize>,

    /// Raw server post this message was built from.
    pub original_post: Option<serde_json::Value>,

    /// The user flagged this post.
    pub flagged: bool,

    /// Owning channel, when known.
    pub channel_id: Option<ChannelId>,
}

impl Message {
    /// Creates a bare message of the given type.
    ///
    /// All optional fields start empty: no author, no identity, no
    /// attachments or reactions, not pending, deleted or flagged.
    #[must_use]
    pub fn new(text: RichText, kind: MessageType, date: ServerTime) -> Self {
        Self {
            text,
            user_name: None,
            date,
            kind,
            pending: false,
            deleted: false,
            attachments: Vec::new(),
            reply_state: ReplyState::NotAReply,
            post_id: None,
            reactions: BTreeMap::new(),
            original_post: None,
            flagged: false,
            channel_id: None,
        }
    }

    /// True for user-authored post types (normal posts and emotes).
    const fn is_user_post(&self) -> bool {
        matches!(
            self.kind,
            MessageType::Post(PostType::Normal | PostType::Emote)
        )
    }

    /// Whether the message may be deleted by its author.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        self.is_user_post()
    }

    /// Whether the message may be replied to.
    #[must_use]
    pub const fn is_replyable(&self) -> bool {
        self.is_user_post()
    }

    /// Whether the message may be edited by its author.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.is_user_post()
    }

    /// Whether this message replies to `target`.
    #[must_use]
    pub fn is_reply_to(&self, target: &PostId) -> bool {
        matches!(&self.reply_state, ReplyState::InReplyTo(parent) if parent == target)
    }

    /// Whether the message is an emote post.
    #[must_use]
    pub const fn is_emote(&self) -> bool {
        matches!(self.kind, MessageType::Post(PostType::Emote))
    }

    /// Whether the message records a join or leave.
    #[must_use]
    pub const fn is_join_leave(&self) -> bool {
        matches!(self.kind, MessageType::Post(PostType::Join | PostType::Leave))
    }

    /// Whether the message is a day separator.
    #[must_use]
    pub const fn is_date_transition(&self) -> bool {
        matches!(
            self.kind,
            MessageType::Client(ClientMessageType::DateTransition)
        )
    }

    /// Whether the message is the unread-messages marker.
    #[must_use]
    pub const fn is_new_messages_transition(&self) -> bool {
        matches!(
            self.kind,
            MessageType::Client(ClientMessageType::NewMessagesTransition)
        )
    }

    /// Whether the client synthesized this message.
    #[must_use]
    pub const fn is_client_generated(&self) -> bool {
        matches!(self.kind, MessageType::Client(_))
    }

    /// Whether this message was derived from a server post.
    #[must_use]
    pub const fn is_server_post(&self) -> bool {
        matches!(self.kind, MessageType::Post(_))
    }
}
