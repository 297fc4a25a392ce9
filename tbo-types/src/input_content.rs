//! Content of the message sent when an inline result is chosen.
//!
//! The four kinds have no discriminator on the wire; they are told apart by
//! which keys are present.

use std::fmt;

use serde_json::{Map, Value};

use crate::deserialize::{self, Deserializable, Error, Field, FromWire, Scalar};
use crate::serialize::ToWire;

/// Formatting applied to a message's text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseMode {
    Markdown,
    Html,
}

impl ParseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::Html     => "HTML",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToWire for ParseMode {
    fn to_wire(&self) -> Value { Value::from(self.as_str()) }
}

impl FromWire for ParseMode {
    fn from_wire(value: &Value, at: Field) -> deserialize::Result<Self> {
        match value.as_str() {
            Some("Markdown") => Ok(Self::Markdown),
            Some("HTML")     => Ok(Self::Html),
            Some(other)      => Err(Error::UnknownVariant { ty: "ParseMode", tag: other.to_owned() }),
            None             => Err(at.invalid("string")),
        }
    }
}

impl Scalar for ParseMode {}

wire_struct! {
    pub struct InputTextMessageContent {
        required scalar message_text: String,
        optional scalar parse_mode: ParseMode,
        optional scalar disable_web_page_preview: bool,
    }
}

wire_struct! {
    pub struct InputLocationMessageContent {
        required scalar latitude: f64,
        required scalar longitude: f64,
    }
}

wire_struct! {
    pub struct InputVenueMessageContent {
        required scalar latitude: f64,
        required scalar longitude: f64,
        required scalar title: String,
        required scalar address: String,
        optional scalar foursquare_id: String,
    }
}

wire_struct! {
    pub struct InputContactMessageContent {
        required scalar phone_number: String,
        required scalar first_name: String,
        optional scalar last_name: String,
    }
}

wire_union! {
    pub enum InputMessageContent {
        Text(InputTextMessageContent),
        Location(InputLocationMessageContent),
        Venue(InputVenueMessageContent),
        Contact(InputContactMessageContent),
    }
}

impl InputMessageContent {
    /// Plain text content with no formatting.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(InputTextMessageContent { message_text: text.into(), ..Default::default() })
    }
}

impl Default for InputMessageContent {
    fn default() -> Self {
        Self::Text(InputTextMessageContent::default())
    }
}

/// `message_text` marks text, `phone_number` a contact, `address` a venue;
/// anything else is decoded as a location.
impl Deserializable for InputMessageContent {
    const NAME: &'static str = "InputMessageContent";

    fn deserialize(map: &Map<String, Value>) -> deserialize::Result<Self> {
        if map.contains_key("message_text") {
            InputTextMessageContent::deserialize(map).map(Self::Text)
        } else if map.contains_key("phone_number") {
            InputContactMessageContent::deserialize(map).map(Self::Contact)
        } else if map.contains_key("address") {
            InputVenueMessageContent::deserialize(map).map(Self::Venue)
        } else {
            InputLocationMessageContent::deserialize(map).map(Self::Location)
        }
    }
}
