//! Typed Telegram Bot API entities and their JSON wire codec.
//!
//! Every entity is declared once in a field table and gets both directions
//! of the codec from it:
//!
//! | Direction | Trait              | Entry points                         |
//! |-----------|--------------------|--------------------------------------|
//! | encode    | [`Serializable`]   | `to_value()`, `to_json()`            |
//! | decode    | [`Deserializable`] | `from_value()`, `from_json()`        |
//!
//! Required fields are always written and must be present on decode. Optional
//! fields are `Option`s: `None` is never written, and a missing key decodes to
//! `None` rather than an error.
//!
//! # Quick start
//!
//! ```rust
//! use tbo_types::{Deserializable, Serializable, types::Message};
//!
//! let json = r#"{"message_id":1,"date":0,"chat":{"id":7,"type":"private"},"text":"hi"}"#;
//! let msg = Message::from_json(json).unwrap();
//! assert_eq!(msg.text.as_deref(), Some("hi"));
//! assert_eq!(msg.to_json(), json);
//! ```
//!
//! # Reply markup
//!
//! Keyboards are sent to the Bot API as a JSON *string* parameter, not a
//! nested object. [`AsReplyMarkup::to_wire_fragment`] produces that string.

#![deny(unsafe_code)]
#![allow(clippy::large_enum_variant)]

#[macro_use]
mod macros;

pub mod deserialize;
pub mod inline_result;
pub mod input_content;
pub mod markup;
pub mod serialize;
pub mod types;

#[cfg(feature = "serde")]
mod serde_impl;

pub use deserialize::{Deserializable, FromWire};
pub use inline_result::InlineQueryResult;
pub use input_content::{InputMessageContent, ParseMode};
pub use markup::{AsReplyMarkup, ReplyMarkup};
pub use serialize::{Serializable, ToWire};

/// An entity with a fixed `type` discriminator on the wire.
///
/// The tag belongs to the type, so it cannot be set (or forgotten) by callers.
pub trait Tagged {
    const TYPE: &'static str;
}
