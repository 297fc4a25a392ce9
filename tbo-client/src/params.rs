//! Request parameters and the typed arguments that fill them.

use std::fmt;

use tbo_types::markup::InlineKeyboardMarkup;
use tbo_types::{AsReplyMarkup, InlineQueryResult, ReplyMarkup, Serializable};

use crate::transport::Part;

// ─── Params ───────────────────────────────────────────────────────────────────

/// Ordered request parameters.
///
/// Scalars become text, inline results a compact JSON array, and reply
/// markup its wire fragment. A single file part turns the request into an upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    parts: Vec<(String, Part)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar parameter.
    pub fn with(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.parts.push((name.to_owned(), Part::Text(value.to_string())));
        self
    }

    /// Add a scalar parameter only when it is present.
    pub fn opt<T: fmt::Display>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None    => self,
        }
    }

    /// Add reply markup as its wire fragment.
    pub fn markup<M: AsReplyMarkup>(self, name: &str, markup: Option<&M>) -> Self {
        self.opt(name, markup.map(AsReplyMarkup::to_wire_fragment))
    }

    /// Add already-built part, e.g. a resolved file.
    pub fn part(mut self, name: &str, part: Part) -> Self {
        self.parts.push((name.to_owned(), part));
        self
    }

    /// Add inline results as one JSON array.
    pub fn results(self, name: &str, results: &[InlineQueryResult]) -> Self {
        let array: Vec<serde_json::Value> = results.iter().map(Serializable::to_value).collect();
        self.with(name, serde_json::Value::Array(array))
    }

    pub fn has_files(&self) -> bool {
        self.parts.iter().any(|(_, p)| matches!(p, Part::File(_)))
    }

    pub fn parts(&self) -> &[(String, Part)] {
        &self.parts
    }

    /// The text parameters, for a query string.
    pub fn query(&self) -> Vec<(String, String)> {
        self.parts
            .iter()
            .filter_map(|(name, part)| match part {
                Part::Text(t) => Some((name.clone(), t.clone())),
                Part::File(_) => None,
            })
            .collect()
    }

    /// The text value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, p)| match p {
            Part::Text(t) if n == name => Some(t.as_str()),
            _ => None,
        })
    }
}

// ─── ChatId ───────────────────────────────────────────────────────────────────

/// Target chat: a numeric id or a channel's `@username`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) if name.starts_with('@') => f.write_str(name),
            Self::Username(name) => write!(f, "@{name}"),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self { Self::Id(id) }
}

impl From<&str> for ChatId {
    fn from(name: &str) -> Self { Self::Username(name.to_owned()) }
}

impl From<String> for ChatId {
    fn from(name: String) -> Self { Self::Username(name) }
}

impl From<&tbo_types::types::Chat> for ChatId {
    fn from(chat: &tbo_types::types::Chat) -> Self { Self::Id(chat.id) }
}

// ─── ChatAction ───────────────────────────────────────────────────────────────

/// What the bot is about to send, shown to users as a status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordAudio,
    UploadAudio,
    UploadDocument,
    FindLocation,
}

impl ChatAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Typing         => "typing",
            Self::UploadPhoto    => "upload_photo",
            Self::RecordVideo    => "record_video",
            Self::UploadVideo    => "upload_video",
            Self::RecordAudio    => "record_audio",
            Self::UploadAudio    => "upload_audio",
            Self::UploadDocument => "upload_document",
            Self::FindLocation   => "find_location",
        }
    }
}

impl fmt::Display for ChatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── SendOptions ──────────────────────────────────────────────────────────────

/// Options shared by every `send_*` method.
///
/// ```rust,no_run
/// # use tbo_client::SendOptions;
/// # use tbo_types::markup::ForceReply;
/// let opts = SendOptions::new()
///     .silent(true)
///     .reply_to(42)
///     .reply_markup(ForceReply::default());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SendOptions {
    pub disable_notification: Option<bool>,
    pub reply_to_message_id:  Option<i64>,
    pub reply_markup:         Option<ReplyMarkup>,
}

impl SendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver without a notification sound.
    pub fn silent(mut self, v: bool) -> Self {
        self.disable_notification = Some(v); self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id); self
    }

    pub fn reply_markup(mut self, markup: impl Into<ReplyMarkup>) -> Self {
        self.reply_markup = Some(markup.into()); self
    }

    pub(crate) fn apply(&self, params: Params) -> Params {
        params
            .opt("disable_notification", self.disable_notification)
            .opt("reply_to_message_id", self.reply_to_message_id)
            .markup("reply_markup", self.reply_markup.as_ref())
    }
}

// ─── Media metadata ───────────────────────────────────────────────────────────

/// Extra fields for `send_audio`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioMeta {
    pub duration:  Option<i32>,
    pub performer: Option<String>,
    pub title:     Option<String>,
}

/// Extra fields for `send_video`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoMeta {
    pub duration: Option<i32>,
    pub width:    Option<i32>,
    pub height:   Option<i32>,
    pub caption:  Option<String>,
}

// ─── Edits ────────────────────────────────────────────────────────────────────

/// The message an `edit_message_*` call targets.
#[derive(Clone, Debug, PartialEq)]
pub enum MessageRef {
    /// A message the bot sent to a chat.
    Chat { chat_id: ChatId, message_id: i64 },
    /// A message sent via the bot in inline mode.
    Inline(String),
}

impl MessageRef {
    pub fn chat(chat_id: impl Into<ChatId>, message_id: i64) -> Self {
        Self::Chat { chat_id: chat_id.into(), message_id }
    }

    pub fn inline(inline_message_id: impl Into<String>) -> Self {
        Self::Inline(inline_message_id.into())
    }

    pub(crate) fn apply(&self, params: Params) -> Params {
        match self {
            Self::Chat { chat_id, message_id } => {
                params.with("chat_id", chat_id).with("message_id", message_id)
            }
            Self::Inline(id) => params.with("inline_message_id", id),
        }
    }
}

/// Options for `edit_message_text`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditTextOptions {
    pub parse_mode:               Option<tbo_types::ParseMode>,
    pub disable_web_page_preview: Option<bool>,
    pub reply_markup:             Option<InlineKeyboardMarkup>,
}

// ─── Inline answers ───────────────────────────────────────────────────────────

/// Options for `answer_inline_query`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineAnswer {
    /// Seconds the result may be cached on the server.
    pub cache_time:          Option<i32>,
    pub is_personal:         Option<bool>,
    /// Passed back in the next query's `offset` to fetch more results.
    pub next_offset:         Option<String>,
    pub switch_pm_text:      Option<String>,
    pub switch_pm_parameter: Option<String>,
}

impl InlineAnswer {
    pub(crate) fn apply(&self, params: Params) -> Params {
        params
            .opt("cache_time", self.cache_time)
            .opt("is_personal", self.is_personal)
            .opt("next_offset", self.next_offset.as_deref())
            .opt("switch_pm_text", self.switch_pm_text.as_deref())
            .opt("switch_pm_parameter", self.switch_pm_parameter.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbo_types::markup::{InlineKeyboardButton, ReplyKeyboardHide};

    #[test]
    fn chat_id_formats() {
        assert_eq!(ChatId::from(-100_123_i64).to_string(), "-100123");
        assert_eq!(ChatId::from("channel").to_string(), "@channel");
        assert_eq!(ChatId::from("@channel").to_string(), "@channel");
    }

    #[test]
    fn options_keep_order_and_skip_absent() {
        let opts = SendOptions::new().reply_to(7).reply_markup(ReplyKeyboardHide::default());
        let params = opts.apply(Params::new().with("chat_id", 1_i64));
        assert_eq!(
            params.query(),
            vec![
                ("chat_id".to_owned(), "1".to_owned()),
                ("reply_to_message_id".to_owned(), "7".to_owned()),
                ("reply_markup".to_owned(), r#"{"hide_keyboard":true}"#.to_owned()),
            ]
        );
        assert!(!params.has_files());
    }

    #[test]
    fn markup_is_a_string_parameter() {
        let kb = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::new("A")]]);
        let params = Params::new().markup("reply_markup", Some(&kb));
        assert_eq!(params.get("reply_markup"), Some(r#"{"inline_keyboard":[[{"text":"A"}]]}"#));
    }

    #[test]
    fn message_ref_params() {
        let p = MessageRef::chat(5_i64, 9).apply(Params::new());
        assert_eq!((p.get("chat_id"), p.get("message_id")), (Some("5"), Some("9")));
        let p = MessageRef::inline("abc").apply(Params::new());
        assert_eq!(p.get("inline_message_id"), Some("abc"));
        assert_eq!(p.get("chat_id"), None);
    }
}
