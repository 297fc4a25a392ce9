//! Entities received from (and occasionally sent to) the Bot API.
//!
//! Leaf media types live in [`media`], the message graph in [`message`],
//! and the update envelope with its inline/callback events in [`update`].

pub mod chat;
pub mod media;
pub mod message;
pub mod update;

pub use chat::{Chat, ChatType, User};
pub use media::{
    Audio, Contact, Document, File, Location, PhotoSize, Sticker, UserProfilePhotos, Venue, Video,
    Voice,
};
pub use message::{Message, MessageContent, MessageEntity};
pub use update::{CallbackQuery, ChosenInlineResult, InlineQuery, Update, UpdatePayload};
