//! Results offered in answer to an inline query.
//!
//! Every concrete result type owns its `type` discriminator (see [`Tagged`]).
//! The URL-based results and their `Cached*` counterparts share a
//! discriminator; the cached ones are recognized by their `*_file_id` key.

use serde_json::{Map, Value};

use crate::Tagged;
use crate::deserialize::{self, Deserializable, Error};
use crate::input_content::InputMessageContent;
use crate::markup::InlineKeyboardMarkup;

// ─── Results with content hosted elsewhere ────────────────────────────────────

wire_struct! {
    /// A link to an article or web page.
    pub struct InlineQueryResultArticle as "article" {
        required scalar id: String,
        required scalar title: String,
        required nested input_message_content: InputMessageContent,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional scalar url: String,
        optional scalar hide_url: bool,
        optional scalar description: String,
        optional scalar thumb_url: String,
        optional scalar thumb_width: i32,
        optional scalar thumb_height: i32,
    }
}

wire_struct! {
    /// A link to a JPEG photo.
    pub struct InlineQueryResultPhoto as "photo" {
        required scalar id: String,
        required scalar photo_url: String,
        required scalar thumb_url: String,
        optional scalar photo_width: i32,
        optional scalar photo_height: i32,
        optional scalar title: String,
        optional scalar description: String,
        optional scalar caption: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    /// A link to an animated GIF.
    pub struct InlineQueryResultGif as "gif" {
        required scalar id: String,
        required scalar gif_url: String,
        optional scalar gif_width: i32,
        optional scalar gif_height: i32,
        required scalar thumb_url: String,
        optional scalar title: String,
        optional scalar caption: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    /// A link to an H.264/MPEG-4 AVC animation without sound.
    pub struct InlineQueryResultMpeg4Gif as "mpeg4_gif" {
        required scalar id: String,
        required scalar mpeg4_url: String,
        optional scalar mpeg4_width: i32,
        optional scalar mpeg4_height: i32,
        required scalar thumb_url: String,
        optional scalar title: String,
        optional scalar caption: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    /// A link to an embedded video player or a video file.
    pub struct InlineQueryResultVideo as "video" {
        required scalar id: String,
        required scalar video_url: String,
        /// `text/html` or `video/mp4`.
        required scalar mime_type: String,
        required scalar thumb_url: String,
        required scalar title: String,
        optional scalar caption: String,
        optional scalar video_width: i32,
        optional scalar video_height: i32,
        optional scalar video_duration: i32,
        optional scalar description: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    /// A link to an MP3 file.
    pub struct InlineQueryResultAudio as "audio" {
        required scalar id: String,
        required scalar audio_url: String,
        required scalar title: String,
        optional scalar performer: String,
        optional scalar audio_duration: i32,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    /// A link to an OGG/OPUS voice recording.
    pub struct InlineQueryResultVoice as "voice" {
        required scalar id: String,
        required scalar voice_url: String,
        required scalar title: String,
        optional scalar performer: String,
        optional scalar voice_duration: i32,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    /// A link to a PDF or ZIP file.
    pub struct InlineQueryResultDocument as "document" {
        required scalar id: String,
        required scalar title: String,
        optional scalar caption: String,
        required scalar document_url: String,
        required scalar mime_type: String,
        optional scalar description: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
        optional scalar thumb_url: String,
        optional scalar thumb_width: i32,
        optional scalar thumb_height: i32,
    }
}

wire_struct! {
    pub struct InlineQueryResultLocation as "location" {
        required scalar id: String,
        required scalar latitude: f64,
        required scalar longitude: f64,
        required scalar title: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
        optional scalar thumb_url: String,
        optional scalar thumb_width: i32,
        optional scalar thumb_height: i32,
    }
}

wire_struct! {
    pub struct InlineQueryResultVenue as "venue" {
        required scalar id: String,
        required scalar latitude: f64,
        required scalar longitude: f64,
        required scalar title: String,
        required scalar address: String,
        optional scalar foursquare_id: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
        optional scalar thumb_url: String,
        optional scalar thumb_width: i32,
        optional scalar thumb_height: i32,
    }
}

wire_struct! {
    pub struct InlineQueryResultContact as "contact" {
        required scalar id: String,
        required scalar phone_number: String,
        required scalar first_name: String,
        optional scalar last_name: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
        optional scalar thumb_url: String,
        optional scalar thumb_width: i32,
        optional scalar thumb_height: i32,
    }
}

// ─── Results referencing files stored on Telegram's servers ───────────────────

wire_struct! {
    pub struct InlineQueryResultCachedPhoto as "photo" {
        required scalar id: String,
        required scalar photo_file_id: String,
        optional scalar title: String,
        optional scalar description: String,
        optional scalar caption: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    pub struct InlineQueryResultCachedGif as "gif" {
        required scalar id: String,
        required scalar gif_file_id: String,
        optional scalar title: String,
        optional scalar caption: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    pub struct InlineQueryResultCachedMpeg4Gif as "mpeg4_gif" {
        required scalar id: String,
        required scalar mpeg4_file_id: String,
        optional scalar title: String,
        optional scalar caption: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    pub struct InlineQueryResultCachedSticker as "sticker" {
        required scalar id: String,
        required scalar sticker_file_id: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    pub struct InlineQueryResultCachedDocument as "document" {
        required scalar id: String,
        required scalar title: String,
        required scalar document_file_id: String,
        optional scalar description: String,
        optional scalar caption: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    pub struct InlineQueryResultCachedVideo as "video" {
        required scalar id: String,
        required scalar video_file_id: String,
        required scalar title: String,
        optional scalar description: String,
        optional scalar caption: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    pub struct InlineQueryResultCachedVoice as "voice" {
        required scalar id: String,
        required scalar voice_file_id: String,
        required scalar title: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

wire_struct! {
    pub struct InlineQueryResultCachedAudio as "audio" {
        required scalar id: String,
        required scalar audio_file_id: String,
        optional nested reply_markup: InlineKeyboardMarkup,
        optional nested input_message_content: InputMessageContent,
    }
}

// ─── InlineQueryResult ────────────────────────────────────────────────────────

wire_union! {
    /// Any inline query result.
    pub enum InlineQueryResult {
        Article(InlineQueryResultArticle),
        Photo(InlineQueryResultPhoto),
        Gif(InlineQueryResultGif),
        Mpeg4Gif(InlineQueryResultMpeg4Gif),
        Video(InlineQueryResultVideo),
        Audio(InlineQueryResultAudio),
        Voice(InlineQueryResultVoice),
        Document(InlineQueryResultDocument),
        Location(InlineQueryResultLocation),
        Venue(InlineQueryResultVenue),
        Contact(InlineQueryResultContact),
        CachedPhoto(InlineQueryResultCachedPhoto),
        CachedGif(InlineQueryResultCachedGif),
        CachedMpeg4Gif(InlineQueryResultCachedMpeg4Gif),
        CachedSticker(InlineQueryResultCachedSticker),
        CachedDocument(InlineQueryResultCachedDocument),
        CachedVideo(InlineQueryResultCachedVideo),
        CachedVoice(InlineQueryResultCachedVoice),
        CachedAudio(InlineQueryResultCachedAudio),
    }
}

impl InlineQueryResult {
    /// The `type` discriminator written for this result.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Article(_)        => InlineQueryResultArticle::TYPE,
            Self::Photo(_)          => InlineQueryResultPhoto::TYPE,
            Self::Gif(_)            => InlineQueryResultGif::TYPE,
            Self::Mpeg4Gif(_)       => InlineQueryResultMpeg4Gif::TYPE,
            Self::Video(_)          => InlineQueryResultVideo::TYPE,
            Self::Audio(_)          => InlineQueryResultAudio::TYPE,
            Self::Voice(_)          => InlineQueryResultVoice::TYPE,
            Self::Document(_)       => InlineQueryResultDocument::TYPE,
            Self::Location(_)       => InlineQueryResultLocation::TYPE,
            Self::Venue(_)          => InlineQueryResultVenue::TYPE,
            Self::Contact(_)        => InlineQueryResultContact::TYPE,
            Self::CachedPhoto(_)    => InlineQueryResultCachedPhoto::TYPE,
            Self::CachedGif(_)      => InlineQueryResultCachedGif::TYPE,
            Self::CachedMpeg4Gif(_) => InlineQueryResultCachedMpeg4Gif::TYPE,
            Self::CachedSticker(_)  => InlineQueryResultCachedSticker::TYPE,
            Self::CachedDocument(_) => InlineQueryResultCachedDocument::TYPE,
            Self::CachedVideo(_)    => InlineQueryResultCachedVideo::TYPE,
            Self::CachedVoice(_)    => InlineQueryResultCachedVoice::TYPE,
            Self::CachedAudio(_)    => InlineQueryResultCachedAudio::TYPE,
        }
    }
}

/// Decode `map` as `Cached` when it holds `file_key`, otherwise as `Url`.
fn url_or_cached<Url, Cached>(
    map: &Map<String, Value>,
    file_key: &str,
    url: fn(Url) -> InlineQueryResult,
    cached: fn(Cached) -> InlineQueryResult,
) -> deserialize::Result<InlineQueryResult>
where
    Url: Deserializable,
    Cached: Deserializable,
{
    if map.contains_key(file_key) {
        Cached::deserialize(map).map(cached)
    } else {
        Url::deserialize(map).map(url)
    }
}

impl Deserializable for InlineQueryResult {
    const NAME: &'static str = "InlineQueryResult";

    fn deserialize(map: &Map<String, Value>) -> deserialize::Result<Self> {
        use InlineQueryResult as R;

        let tag: String = deserialize::required_scalar(map, Self::NAME, "type")?;
        match tag.as_str() {
            "article"  => InlineQueryResultArticle::deserialize(map).map(R::Article),
            "location" => InlineQueryResultLocation::deserialize(map).map(R::Location),
            "venue"    => InlineQueryResultVenue::deserialize(map).map(R::Venue),
            "contact"  => InlineQueryResultContact::deserialize(map).map(R::Contact),
            "sticker"  => InlineQueryResultCachedSticker::deserialize(map).map(R::CachedSticker),
            "photo"     => url_or_cached(map, "photo_file_id", R::Photo, R::CachedPhoto),
            "gif"       => url_or_cached(map, "gif_file_id", R::Gif, R::CachedGif),
            "mpeg4_gif" => url_or_cached(map, "mpeg4_file_id", R::Mpeg4Gif, R::CachedMpeg4Gif),
            "video"     => url_or_cached(map, "video_file_id", R::Video, R::CachedVideo),
            "audio"     => url_or_cached(map, "audio_file_id", R::Audio, R::CachedAudio),
            "voice"     => url_or_cached(map, "voice_file_id", R::Voice, R::CachedVoice),
            "document"  => url_or_cached(map, "document_file_id", R::Document, R::CachedDocument),
            _ => Err(Error::UnknownVariant { ty: Self::NAME, tag }),
        }
    }
}

// ─── Constructors ─────────────────────────────────────────────────────────────

impl InlineQueryResultArticle {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        input_message_content: InputMessageContent,
    ) -> Self {
        Self { id: id.into(), title: title.into(), input_message_content, ..Default::default() }
    }
}

impl InlineQueryResultPhoto {
    pub fn new(id: impl Into<String>, photo_url: impl Into<String>, thumb_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            photo_url: photo_url.into(),
            thumb_url: thumb_url.into(),
            ..Default::default()
        }
    }
}

impl InlineQueryResultCachedPhoto {
    pub fn new(id: impl Into<String>, photo_file_id: impl Into<String>) -> Self {
        Self { id: id.into(), photo_file_id: photo_file_id.into(), ..Default::default() }
    }
}

impl InlineQueryResultCachedSticker {
    pub fn new(id: impl Into<String>, sticker_file_id: impl Into<String>) -> Self {
        Self { id: id.into(), sticker_file_id: sticker_file_id.into(), ..Default::default() }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
