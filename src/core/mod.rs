//! Core domain models for chanlog.
//!
//! This module contains the message entity and the value types it is built
//! from, plus the ingestion records that are converted into messages. These
//! are pure domain models with no I/O dependencies.

pub mod ids;
pub mod message;
pub mod post;
pub mod time;

pub use ids::{ChannelId, PostId};
pub use message::{
    Attachment, ClientMessageType, Message, MessageType, PostType, ReplyState, RichText,
};
pub use post::{ClientMessage, Event, Post};
pub use time::ServerTime;
