use super::chat::User;
use super::media::Location;
use super::message::Message;

wire_struct! {
    /// An incoming update, as returned by `getUpdates`.
    ///
    /// At most one of the optional payload fields is present in any update.
    pub struct Update {
        /// Monotonically increasing; used as the `getUpdates` offset.
        required scalar update_id: i64,
        optional nested message: Message,
        optional nested inline_query: InlineQuery,
        optional nested chosen_inline_result: ChosenInlineResult,
        optional nested callback_query: CallbackQuery,
    }
}

/// The payload of an [`Update`], borrowed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdatePayload<'a> {
    Message(&'a Message),
    InlineQuery(&'a InlineQuery),
    ChosenInlineResult(&'a ChosenInlineResult),
    CallbackQuery(&'a CallbackQuery),
}

impl Update {
    /// The populated payload. Exclusivity is not checked: if an update were to
    /// carry several, the first in declaration order is returned.
    pub fn payload(&self) -> Option<UpdatePayload<'_>> {
        if let Some(m) = &self.message { return Some(UpdatePayload::Message(m)); }
        if let Some(q) = &self.inline_query { return Some(UpdatePayload::InlineQuery(q)); }
        if let Some(r) = &self.chosen_inline_result {
            return Some(UpdatePayload::ChosenInlineResult(r));
        }
        self.callback_query.as_ref().map(UpdatePayload::CallbackQuery)
    }
}

wire_struct! {
    /// A press on an inline keyboard callback button.
    ///
    /// `message` is set when the button was attached to a message sent by the
    /// bot; `inline_message_id` when it came from an inline-mode message.
    pub struct CallbackQuery {
        required scalar id: String,
        required nested from: User,
        optional nested message: Message,
        optional scalar inline_message_id: String,
        optional scalar data: String,
    }
}

wire_struct! {
    /// An incoming inline query.
    pub struct InlineQuery {
        required scalar id: String,
        required nested from: User,
        required scalar query: String,
        required scalar offset: String,
        optional nested location: Location,
    }
}

wire_struct! {
    /// An inline result that was chosen by a user and sent to their chat partner.
    pub struct ChosenInlineResult {
        required scalar result_id: String,
        required nested from: User,
        required scalar query: String,
        optional nested location: Location,
        optional scalar inline_message_id: String,
    }
}
