//! Ingestion records.
//!
//! The network layer hands the log raw [`Post`]s and locally produced
//! [`ClientMessage`]s; both are converted into [`Message`]s before they are
//! folded into a channel log. [`Event`] is the tagged union of the two used
//! by newline-delimited JSON streams.

use crate::core::ids::{ChannelId, PostId};
use crate::core::message::{
    Attachment, ClientMessageType, Message, MessageType, PostType, ReplyState, RichText,
};
use crate::core::time::ServerTime;
use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw post as delivered by the server.
///
/// Times are epoch milliseconds. A non-zero `delete_at` marks the post as
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server identity.
    pub id: PostId,

    /// Owning channel.
    #[serde(default)]
    pub channel_id: Option<ChannelId>,

    /// Author display name, resolved by the session layer.
    #[serde(default)]
    pub user_name: Option<String>,

    /// Body, already parsed by the rich-text layer.
    #[serde(default)]
    pub message: String,

    /// Creation time in epoch milliseconds.
    pub create_at: i64,

    /// Deletion time in epoch milliseconds, zero if live.
    #[serde(default)]
    pub delete_at: i64,

    /// Thread root this post replies to.
    #[serde(default)]
    pub root_id: Option<PostId>,

    /// Post subtype.
    #[serde(default, rename = "type")]
    pub post_type: PostType,

    /// Attached files.
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Reaction name to count.
    #[serde(default)]
    pub reactions: BTreeMap<String, usize>,

    /// Sent by this client and not yet confirmed.
    #[serde(default)]
    pub pending: bool,

    /// Flagged by the current user.
    #[serde(default)]
    pub flagged: bool,
}

/// Event synthesized by the client itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    /// Display text.
    pub text: String,

    /// Server-relative time the event belongs at.
    pub date: ServerTime,

    /// Client message subtype.
    #[serde(default, rename = "type")]
    pub client_type: ClientMessageType,
}

impl ClientMessage {
    /// Creates a client event.
    #[must_use]
    pub fn new(text: impl Into<String>, date: ServerTime, client_type: ClientMessageType) -> Self {
        Self {
            text: text.into(),
            date,
            client_type,
        }
    }
}

/// One record of an event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// A server post.
    Post(Post),
    /// A client-generated event.
    Client(ClientMessage),
}

impl Event {
    /// Converts the record into a log message.
    ///
    /// # Errors
    ///
    /// Fails only for posts; see [`Message::from_post`].
    pub fn into_message(self) -> Result<Message, InputError> {
        match self {
            Self::Post(post) => Message::from_post(post),
            Self::Client(client) => Ok(client.into()),
        }
    }
}

impl Message {
    /// Converts a server post into a message.
    ///
    /// The raw post is kept as the message's `original_post` snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingPostId`] for a post with an empty
    /// identity and [`InputError::InvalidTimestamp`] if `create_at` is out
    /// of range.
    pub fn from_post(post: Post) -> Result<Self, InputError> {
        if post.id.is_empty() {
            return Err(InputError::MissingPostId);
        }
        let date = ServerTime::from_millis(post.create_at).ok_or(InputError::InvalidTimestamp {
            value: post.create_at,
        })?;
        let original_post = serde_json::to_value(&post).ok();

        let reply_state = match post.root_id {
            Some(root) if !root.is_empty() => ReplyState::InReplyTo(root),
            _ => ReplyState::NotAReply,
        };

        Ok(Self {
            text: RichText::from(post.message),
            user_name: post.user_name,
            date,
            kind: MessageType::Post(post.post_type),
            pending: post.pending,
            deleted: post.delete_at > 0,
            attachments: post.attachments,
            reply_state,
            post_id: Some(post.id),
            reactions: post.reactions,
            original_post,
            flagged: post.flagged,
            channel_id: post.channel_id,
        })
    }
}

impl From<ClientMessage> for Message {
    fn from(client: ClientMessage) -> Self {
        Self::new(
            RichText::from(client.text),
            MessageType::Client(client.client_type),
            client.date,
        )
    }
}
