use chrono::{DateTime, Utc};

use super::chat::{Chat, User};
use super::media::{Audio, Contact, Document, Location, PhotoSize, Sticker, Venue, Video, Voice};

wire_struct! {
    /// A message.
    ///
    /// A message carries at most one content field (`text`, `photo`, ...) and
    /// any number of service fields. `reply_to_message` and `pinned_message`
    /// hold whole messages, decoded with the same rules one level down.
    pub struct Message {
        required scalar message_id: i64,
        /// Unix time the message was sent.
        required scalar date: i64,
        required nested chat: Chat,
        /// Empty for messages sent to channels.
        optional nested from: User,
        optional nested forward_from: User,
        optional scalar forward_date: i64,
        optional nested reply_to_message: Box<Message>,
        optional scalar text: String,
        /// Usernames, URLs, bot commands, etc. that appear in `text`.
        optional array entities: MessageEntity,
        optional nested audio: Audio,
        optional nested document: Document,
        /// Available sizes of the photo.
        optional array photo: PhotoSize,
        optional nested sticker: Sticker,
        optional nested video: Video,
        optional nested voice: Voice,
        optional scalar caption: String,
        optional nested contact: Contact,
        optional nested location: Location,
        optional nested venue: Venue,
        optional nested new_chat_member: User,
        optional nested left_chat_member: User,
        optional scalar new_chat_title: String,
        optional array new_chat_photo: PhotoSize,
        optional scalar delete_chat_photo: bool,
        optional scalar group_chat_created: bool,
        optional scalar supergroup_chat_created: bool,
        optional scalar channel_chat_created: bool,
        optional scalar migrate_to_chat_id: i64,
        optional scalar migrate_from_chat_id: i64,
        optional nested pinned_message: Box<Message>,
    }
}

wire_struct! {
    /// A special entity in a text message: hashtag, username, URL, etc.
    pub struct MessageEntity {
        required scalar kind: String = "type",
        required scalar offset: i32,
        required scalar length: i32,
        /// Only for `text_link` entities.
        optional scalar url: String,
    }
}

/// The content field of a [`Message`], borrowed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MessageContent<'a> {
    Text(&'a str),
    Audio(&'a Audio),
    Document(&'a Document),
    Photo(&'a [PhotoSize]),
    Sticker(&'a Sticker),
    Video(&'a Video),
    Voice(&'a Voice),
    Contact(&'a Contact),
    Venue(&'a Venue),
    Location(&'a Location),
}

impl Message {
    /// The first populated content field, if any.
    ///
    /// Venue messages also carry a bare `location`; the venue wins.
    pub fn content(&self) -> Option<MessageContent<'_>> {
        if let Some(t) = &self.text { return Some(MessageContent::Text(t)); }
        if let Some(a) = &self.audio { return Some(MessageContent::Audio(a)); }
        if let Some(d) = &self.document { return Some(MessageContent::Document(d)); }
        if let Some(p) = &self.photo { return Some(MessageContent::Photo(p)); }
        if let Some(s) = &self.sticker { return Some(MessageContent::Sticker(s)); }
        if let Some(v) = &self.video { return Some(MessageContent::Video(v)); }
        if let Some(v) = &self.voice { return Some(MessageContent::Voice(v)); }
        if let Some(c) = &self.contact { return Some(MessageContent::Contact(c)); }
        if let Some(v) = &self.venue { return Some(MessageContent::Venue(v)); }
        self.location.as_ref().map(MessageContent::Location)
    }

    /// `date` as a UTC timestamp. `None` if it is out of chrono's range.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    /// The largest photo size, by pixel count.
    pub fn largest_photo(&self) -> Option<&PhotoSize> {
        self.photo.as_deref()?.iter().max_by_key(|p| p.area())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Deserializable;

    #[test]
    fn venue_wins_over_location() {
        let msg = Message::from_json(
            r#"{"message_id":1,"date":0,"chat":{"id":1,"type":"private"},
                "location":{"longitude":1.0,"latitude":2.0},
                "venue":{"location":{"longitude":1.0,"latitude":2.0},"title":"t","address":"a"}}"#,
        )
        .unwrap();
        assert!(matches!(msg.content(), Some(MessageContent::Venue(_))));
    }

    #[test]
    fn date_time_from_unix() {
        let msg = Message { date: 1_464_000_000, ..Default::default() };
        assert_eq!(msg.date_time().unwrap().timestamp(), 1_464_000_000);
    }

    #[test]
    fn largest_photo_by_area() {
        let small = PhotoSize { file_id: "s".into(), width: 90, height: 90, file_size: None };
        let big = PhotoSize { file_id: "b".into(), width: 800, height: 600, file_size: None };
        let msg = Message { photo: Some(vec![small, big]), ..Default::default() };
        assert_eq!(msg.largest_photo().unwrap().file_id, "b");
    }
}
