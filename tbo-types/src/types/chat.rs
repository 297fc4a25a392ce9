use serde_json::Value;

use crate::deserialize::{self, Field, FromWire, Scalar};
use crate::serialize::ToWire;

wire_struct! {
    /// A Telegram user or bot.
    pub struct User {
        required scalar id: i64,
        required scalar first_name: String,
        optional scalar last_name: String,
        optional scalar username: String,
    }
}

impl User {
    /// `first_name` followed by `last_name`, when there is one.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {last}", self.first_name),
            None       => self.first_name.clone(),
        }
    }
}

/// The kind of a [`Chat`], sent on the wire as its lowercase name.
///
/// Kinds this crate does not know are kept verbatim in `Other`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChatType {
    #[default]
    Private,
    Group,
    Supergroup,
    Channel,
    Other(String),
}

impl ChatType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Private    => "private",
            Self::Group      => "group",
            Self::Supergroup => "supergroup",
            Self::Channel    => "channel",
            Self::Other(s)   => s,
        }
    }
}

impl ToWire for ChatType {
    fn to_wire(&self) -> Value { Value::from(self.as_str()) }
}

impl FromWire for ChatType {
    fn from_wire(value: &Value, at: Field) -> deserialize::Result<Self> {
        match value.as_str() {
            Some("private")    => Ok(Self::Private),
            Some("group")      => Ok(Self::Group),
            Some("supergroup") => Ok(Self::Supergroup),
            Some("channel")    => Ok(Self::Channel),
            Some(other)        => Ok(Self::Other(other.to_owned())),
            None               => Err(at.invalid("string")),
        }
    }
}

impl Scalar for ChatType {}

wire_struct! {
    /// A private chat, group, supergroup or channel.
    pub struct Chat {
        required scalar id: i64,
        required scalar kind: ChatType = "type",
        optional scalar title: String,
        optional scalar username: String,
        optional scalar first_name: String,
        optional scalar last_name: String,
    }
}

impl Chat {
    pub fn is_private(&self) -> bool {
        self.kind == ChatType::Private
    }
}
