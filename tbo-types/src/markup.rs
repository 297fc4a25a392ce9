//! Keyboards and the other reply-markup options.
//!
//! The Bot API takes `reply_markup` as a JSON-serialized *string* parameter,
//! while every other nested object is a structured field. [`AsReplyMarkup`]
//! keeps that path separate: use [`AsReplyMarkup::to_wire_fragment`] for the
//! request parameter and the regular [`Serializable`] methods everywhere else
//! (e.g. the `reply_markup` of an inline result).

use serde_json::{Map, Value};

use crate::deserialize::{self, Deserializable, Error, Field, FromWire};
use crate::serialize::{Serializable, ToWire, put_opt};

/// A value that can be passed as a message's `reply_markup`.
pub trait AsReplyMarkup: Serializable {
    /// Compact JSON text, sent as a single string parameter.
    fn to_wire_fragment(&self) -> String {
        self.to_json()
    }
}

// ─── Reply keyboard ───────────────────────────────────────────────────────────

wire_struct! {
    /// A custom keyboard with reply options.
    pub struct ReplyKeyboardMarkup {
        /// Rows of buttons, top to bottom.
        required array_of_array keyboard: KeyboardButton,
        optional scalar resize_keyboard: bool,
        optional scalar one_time_keyboard: bool,
        optional scalar selective: bool,
    }
}

wire_struct! {
    /// One button of a reply keyboard. `text` is sent as a message when pressed.
    pub struct KeyboardButton {
        required scalar text: String,
        optional scalar request_contact: bool,
        optional scalar request_location: bool,
    }
}

impl ReplyKeyboardMarkup {
    pub fn new(keyboard: Vec<Vec<KeyboardButton>>) -> Self {
        Self { keyboard, ..Default::default() }
    }
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }
}

impl From<&str> for KeyboardButton {
    fn from(text: &str) -> Self { Self::new(text) }
}

// ─── Inline keyboard ──────────────────────────────────────────────────────────

wire_struct! {
    /// A keyboard attached to the message it belongs to.
    pub struct InlineKeyboardMarkup {
        required array_of_array inline_keyboard: InlineKeyboardButton,
    }
}

wire_struct! {
    /// One button of an inline keyboard. Exactly one optional field should be set.
    pub struct InlineKeyboardButton {
        required scalar text: String,
        optional scalar url: String,
        optional scalar callback_data: String,
        optional scalar switch_inline_query: String,
    }
}

impl InlineKeyboardMarkup {
    pub fn new(inline_keyboard: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self { inline_keyboard }
    }
}

impl InlineKeyboardButton {
    /// A button with only a label.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self { url: Some(url.into()), ..Self::new(text) }
    }

    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self { callback_data: Some(data.into()), ..Self::new(text) }
    }

    pub fn switch_inline_query(text: impl Into<String>, query: impl Into<String>) -> Self {
        Self { switch_inline_query: Some(query.into()), ..Self::new(text) }
    }
}

// ─── Flag requests ────────────────────────────────────────────────────────────
//
// Both carry one flag that is always `true`. It is written on encode and,
// when present, checked on decode; it is never stored.

fn check_flag(map: &Map<String, Value>, ty: &'static str, flag: &'static str) -> deserialize::Result<()> {
    match map.get(flag) {
        None | Some(Value::Bool(true)) => Ok(()),
        Some(_) => Err(Error::InvalidValue { ty, field: flag, expected: "true" }),
    }
}

/// Removes the current custom keyboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReplyKeyboardHide {
    pub selective: Option<bool>,
}

impl Serializable for ReplyKeyboardHide {
    fn serialize(&self, map: &mut Map<String, Value>) {
        map.insert("hide_keyboard".to_owned(), Value::Bool(true));
        put_opt(map, "selective", &self.selective);
    }
}

impl Deserializable for ReplyKeyboardHide {
    const NAME: &'static str = "ReplyKeyboardHide";

    fn deserialize(map: &Map<String, Value>) -> deserialize::Result<Self> {
        check_flag(map, Self::NAME, "hide_keyboard")?;
        Ok(Self { selective: deserialize::optional_scalar(map, Self::NAME, "selective")? })
    }
}

/// Makes the client show a reply interface, as if the user tapped "Reply".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForceReply {
    pub selective: Option<bool>,
}

impl Serializable for ForceReply {
    fn serialize(&self, map: &mut Map<String, Value>) {
        map.insert("force_reply".to_owned(), Value::Bool(true));
        put_opt(map, "selective", &self.selective);
    }
}

impl Deserializable for ForceReply {
    const NAME: &'static str = "ForceReply";

    fn deserialize(map: &Map<String, Value>) -> deserialize::Result<Self> {
        check_flag(map, Self::NAME, "force_reply")?;
        Ok(Self { selective: deserialize::optional_scalar(map, Self::NAME, "selective")? })
    }
}

impl ToWire for ReplyKeyboardHide {
    fn to_wire(&self) -> Value { self.to_value() }
}

impl ToWire for ForceReply {
    fn to_wire(&self) -> Value { self.to_value() }
}

impl FromWire for ReplyKeyboardHide {
    fn from_wire(value: &Value, at: Field) -> deserialize::Result<Self> {
        deserialize::nested(value, at)
    }
}

impl FromWire for ForceReply {
    fn from_wire(value: &Value, at: Field) -> deserialize::Result<Self> {
        deserialize::nested(value, at)
    }
}

// ─── ReplyMarkup ──────────────────────────────────────────────────────────────

wire_union! {
    /// Any of the four reply-markup options.
    pub enum ReplyMarkup {
        Keyboard(ReplyKeyboardMarkup),
        Inline(InlineKeyboardMarkup),
        Hide(ReplyKeyboardHide),
        ForceReply(ForceReply),
    }
}

/// Picks the option by its distinguishing key.
impl Deserializable for ReplyMarkup {
    const NAME: &'static str = "ReplyMarkup";

    fn deserialize(map: &Map<String, Value>) -> deserialize::Result<Self> {
        if map.contains_key("inline_keyboard") {
            InlineKeyboardMarkup::deserialize(map).map(Self::Inline)
        } else if map.contains_key("keyboard") {
            ReplyKeyboardMarkup::deserialize(map).map(Self::Keyboard)
        } else if map.contains_key("hide_keyboard") {
            ReplyKeyboardHide::deserialize(map).map(Self::Hide)
        } else if map.contains_key("force_reply") {
            ForceReply::deserialize(map).map(Self::ForceReply)
        } else {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            Err(Error::UnknownVariant { ty: Self::NAME, tag: keys.join(",") })
        }
    }
}

impl AsReplyMarkup for ReplyKeyboardMarkup {}
impl AsReplyMarkup for InlineKeyboardMarkup {}
impl AsReplyMarkup for ReplyKeyboardHide {}
impl AsReplyMarkup for ForceReply {}
impl AsReplyMarkup for ReplyMarkup {}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_keyboard_fragment_is_compact_text() {
        let markup = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::new("A")]]);
        assert_eq!(markup.to_wire_fragment(), r#"{"inline_keyboard":[[{"text":"A"}]]}"#);
    }

    #[test]
    fn hide_always_writes_flag() {
        assert_eq!(ReplyKeyboardHide::default().to_wire_fragment(), r#"{"hide_keyboard":true}"#);
        let fr = ForceReply { selective: Some(false) };
        assert_eq!(fr.to_wire_fragment(), r#"{"force_reply":true,"selective":false}"#);
    }

    #[test]
    fn flag_must_be_true_when_present() {
        assert_eq!(ForceReply::from_json(r#"{"selective":true}"#).unwrap().selective, Some(true));
        assert!(matches!(
            ReplyKeyboardHide::from_json(r#"{"hide_keyboard":false}"#),
            Err(Error::InvalidValue { field: "hide_keyboard", .. })
        ));
    }

    #[test]
    fn reply_markup_picks_variant_by_key() {
        let m = ReplyMarkup::from_json(r#"{"keyboard":[[{"text":"x"}]],"selective":true}"#).unwrap();
        assert!(matches!(m, ReplyMarkup::Keyboard(ref k) if k.selective == Some(true)));
        let m = ReplyMarkup::from_json(r#"{"force_reply":true}"#).unwrap();
        assert_eq!(m, ReplyMarkup::ForceReply(ForceReply::default()));
        assert!(ReplyMarkup::from_json(r#"{"nothing":1}"#).is_err());
    }

    #[test]
    fn enum_fragment_matches_inner() {
        let inner = ReplyKeyboardMarkup::new(vec![vec!["a".into(), "b".into()], vec!["c".into()]]);
        let outer = ReplyMarkup::from(inner.clone());
        assert_eq!(outer.to_wire_fragment(), inner.to_wire_fragment());
    }
}
