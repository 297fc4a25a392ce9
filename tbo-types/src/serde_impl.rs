//! `serde` support, routed through the wire codec so both paths agree on
//! field names and on optional-field omission.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::inline_result::*;
use crate::input_content::*;
use crate::markup::*;
use crate::types::*;
use crate::{Deserializable, Serializable};

macro_rules! via_wire {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                    Serialize::serialize(&Serializable::to_value(self), s)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                    let value = Value::deserialize(d)?;
                    <$ty as Deserializable>::from_value(&value).map_err(D::Error::custom)
                }
            }
        )*
    };
}

via_wire! {
    Update, User, Chat, Message, MessageEntity, PhotoSize, Audio, Document, Sticker, Video, Voice,
    Contact, Location, Venue, UserProfilePhotos, File, CallbackQuery, InlineQuery,
    ChosenInlineResult,
    ReplyKeyboardMarkup, KeyboardButton, ReplyKeyboardHide, ForceReply, InlineKeyboardMarkup,
    InlineKeyboardButton, ReplyMarkup,
    InputMessageContent, InputTextMessageContent, InputLocationMessageContent,
    InputVenueMessageContent, InputContactMessageContent,
    InlineQueryResult, InlineQueryResultArticle, InlineQueryResultPhoto, InlineQueryResultGif,
    InlineQueryResultMpeg4Gif, InlineQueryResultVideo, InlineQueryResultAudio,
    InlineQueryResultVoice, InlineQueryResultDocument, InlineQueryResultLocation,
    InlineQueryResultVenue, InlineQueryResultContact, InlineQueryResultCachedPhoto,
    InlineQueryResultCachedGif, InlineQueryResultCachedMpeg4Gif, InlineQueryResultCachedSticker,
    InlineQueryResultCachedDocument, InlineQueryResultCachedVideo, InlineQueryResultCachedVoice,
    InlineQueryResultCachedAudio,
}
