//! # tbo-client
//!
//! Async client for the Telegram Bot API, built on the [`tbo_types`] codec.
//!
//! ## Features
//! - One typed method per Bot API call: messages, media, locations, venues,
//!   contacts, chat actions, profile photos, files, moderation, callback and
//!   inline answers, message edits
//! - Local files and in-memory buffers uploaded as multipart, with the MIME
//!   type guessed from the file name
//! - Flood-control (`429 retry_after`) auto-retry with configurable policy
//! - Long-polling update stream
//! - Pluggable [`Transport`] (reqwest by default)
//!
//! ```rust,no_run
//! use tbo_client::{Client, Config, SendOptions};
//!
//! # async fn run() -> Result<(), tbo_client::InvocationError> {
//! let client = Client::connect(Config::new("123456:ABC-DEF")).await?;
//! let mut updates = client.stream_updates();
//! while let Some(update) = updates.next().await {
//!     if let Some(msg) = update.message {
//!         client.send_message(msg.chat.id, "pong", None, None, &SendOptions::new()).await?;
//!     }
//! }
//! # Ok(()) }
//! ```

#![deny(unsafe_code)]

mod errors;
mod params;
mod response;
mod retry;
pub mod media;
pub mod transport;
pub mod update;

pub use errors::{ApiError, InvocationError};
pub use media::{FilePart, InputFile};
pub use params::{
    AudioMeta, ChatAction, ChatId, EditTextOptions, InlineAnswer, MessageRef, Params, SendOptions,
    VideoMeta,
};
pub use response::EditResult;
pub use retry::{AutoSleep, NoRetries, RetryContext, RetryPolicy};
pub use tbo_types::ParseMode;
pub use transport::{HttpTransport, Transport};
pub use update::UpdateStream;

use std::num::NonZeroU32;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tbo_types::deserialize::{Field, FromWire};
use tbo_types::markup::InlineKeyboardMarkup;
use tbo_types::types::{File, Message, Update, User, UserProfilePhotos};
use tbo_types::InlineQueryResult;
use tokio::time::sleep;

/// Default Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

// ─── Config ───────────────────────────────────────────────────────────────────

/// Configuration for [`Client::connect`].
pub struct Config {
    /// Bot token as issued by @BotFather.
    pub token:        String,
    /// Base URL; requests go to `{api_url}/bot{token}/{method}`.
    pub api_url:      String,
    pub retry_policy: Arc<dyn RetryPolicy>,
    /// Whole-request HTTP timeout. Must exceed `poll_timeout`.
    pub timeout:      Duration,
    /// Long-polling timeout passed to `getUpdates` by the update stream.
    pub poll_timeout: Duration,
}

impl Config {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), ..Default::default() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token:        String::new(),
            api_url:      DEFAULT_API_URL.to_owned(),
            retry_policy: Arc::new(AutoSleep::default()),
            timeout:      Duration::from_secs(60),
            poll_timeout: Duration::from_secs(30),
        }
    }
}

// ─── Client ───────────────────────────────────────────────────────────────────

struct ClientInner {
    transport:    Arc<dyn Transport>,
    retry_policy: Arc<dyn RetryPolicy>,
    api_url:      String,
    token:        String,
    poll_timeout: Duration,
    me:           User,
}

/// The Bot API client. Cheap to clone, the state is shared behind an `Arc`.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    // ── Connect ────────────────────────────────────────────────────────────

    /// Build the HTTP transport and check the token with `getMe`.
    pub async fn connect(config: Config) -> Result<Self, InvocationError> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Self::connect_with(config, transport).await
    }

    /// Like [`Client::connect`], over a caller-supplied transport.
    ///
    /// A `getMe` reply that is not a Bot API envelope means the token does not
    /// name a bot and yields [`InvocationError::BotNotFound`].
    pub async fn connect_with(config: Config, transport: Arc<dyn Transport>) -> Result<Self, InvocationError> {
        let probe = Self::from_parts(&config, transport.clone(), User::default());
        let me = match probe.get_me().await {
            Ok(me) => me,
            Err(InvocationError::MalformedResponse { reason, .. }) => {
                tracing::warn!("[tbo] getMe returned a malformed response: {reason}");
                return Err(InvocationError::BotNotFound);
            }
            Err(e) => return Err(e),
        };
        tracing::info!(
            "[tbo] Connected as {} (id {})",
            me.username.as_deref().map_or_else(|| me.first_name.clone(), |u| format!("@{u}")),
            me.id
        );
        Ok(Self::from_parts(&config, transport, me))
    }

    fn from_parts(config: &Config, transport: Arc<dyn Transport>, me: User) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                retry_policy: config.retry_policy.clone(),
                api_url:      config.api_url.trim_end_matches('/').to_owned(),
                token:        config.token.clone(),
                poll_timeout: config.poll_timeout,
                me,
            }),
        }
    }

    /// The bot's own user, as returned by `getMe` on connect.
    pub fn me(&self) -> &User {
        &self.inner.me
    }

    // ── Raw invoke ─────────────────────────────────────────────────────────

    /// Call any Bot API method and decode its `result` as `T`.
    ///
    /// Flood-control and HTTP failures go through the retry policy; decode
    /// failures are returned as they are.
    pub async fn invoke<T: FromWire>(&self, method: &'static str, params: Params) -> Result<T, InvocationError> {
        let result = self.call_raw(method, &params).await?;
        T::from_wire(&result, Field::new(method, "result")).map_err(Into::into)
    }

    async fn call_raw(&self, method: &'static str, params: &Params) -> Result<Value, InvocationError> {
        let mut fail_count   = NonZeroU32::MIN;
        let mut slept_so_far = Duration::default();
        loop {
            match self.do_call(method, params).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    let ctx = RetryContext { method, fail_count, slept_so_far, error: e };
                    match self.inner.retry_policy.should_retry(&ctx) {
                        ControlFlow::Continue(delay) => {
                            sleep(delay).await;
                            slept_so_far += delay;
                            fail_count = fail_count.saturating_add(1);
                        }
                        ControlFlow::Break(()) => return Err(ctx.error),
                    }
                }
            }
        }
    }

    async fn do_call(&self, method: &'static str, params: &Params) -> Result<Value, InvocationError> {
        let transport = &self.inner.transport;
        let body = if params.has_files() {
            tracing::debug!("[tbo] POST {method} (multipart, {} fields)", params.parts().len());
            transport.post_multipart(method, params.parts()).await?
        } else {
            tracing::debug!("[tbo] GET {method} ({} params)", params.parts().len());
            transport.get(method, &params.query()).await?
        };
        response::unwrap_envelope(method, &body)
    }

    // ── Self & updates ─────────────────────────────────────────────────────

    /// Fetch the bot's own user. Also a cheap way to test the token.
    pub async fn get_me(&self) -> Result<User, InvocationError> {
        self.invoke("getMe", Params::new()).await
    }

    /// Poll for updates. `timeout` (seconds) enables long polling.
    pub async fn get_updates(
        &self,
        offset:  Option<i64>,
        limit:   Option<i32>,
        timeout: Option<i32>,
    ) -> Result<Vec<Update>, InvocationError> {
        self.invoke("getUpdates", updates_params(offset, limit, timeout)).await
    }

    /// `getUpdates` with every update left as raw JSON, so one bad entry
    /// does not sink the whole batch.
    pub(crate) async fn get_updates_raw(
        &self,
        offset:  Option<i64>,
        limit:   Option<i32>,
        timeout: Option<i32>,
    ) -> Result<Vec<Value>, InvocationError> {
        let params = updates_params(offset, limit, timeout);
        match self.call_raw("getUpdates", &params).await? {
            Value::Array(batch) => Ok(batch),
            _ => Err(Field::new("getUpdates", "result").invalid("array").into()),
        }
    }

    /// Return an [`UpdateStream`] fed by a background long-polling task.
    pub fn stream_updates(&self) -> UpdateStream {
        update::spawn(self.clone(), self.inner.poll_timeout)
    }

    /// Receive updates at `url` instead of polling. `certificate` uploads a
    /// self-signed public key.
    pub async fn set_webhook(&self, url: &str, certificate: Option<InputFile>) -> Result<bool, InvocationError> {
        let mut params = Params::new().with("url", url);
        if let Some(cert) = certificate {
            params = params.part("certificate", cert.into_part().await?);
        }
        self.invoke("setWebhook", params).await
    }

    /// Remove the webhook so `getUpdates` works again.
    pub async fn unset_webhook(&self) -> Result<bool, InvocationError> {
        self.invoke("setWebhook", Params::new()).await
    }

    // ── Messaging ──────────────────────────────────────────────────────────

    pub async fn send_message(
        &self,
        chat_id:                  impl Into<ChatId>,
        text:                     &str,
        parse_mode:               Option<ParseMode>,
        disable_web_page_preview: Option<bool>,
        opts:                     &SendOptions,
    ) -> Result<Message, InvocationError> {
        let params = Params::new()
            .with("chat_id", chat_id.into())
            .with("text", text)
            .opt("parse_mode", parse_mode)
            .opt("disable_web_page_preview", disable_web_page_preview);
        self.invoke("sendMessage", opts.apply(params)).await
    }

    pub async fn forward_message(
        &self,
        chat_id:              impl Into<ChatId>,
        from_chat_id:         impl Into<ChatId>,
        message_id:           i64,
        disable_notification: Option<bool>,
    ) -> Result<Message, InvocationError> {
        let params = Params::new()
            .with("chat_id", chat_id.into())
            .with("from_chat_id", from_chat_id.into())
            .with("message_id", message_id)
            .opt("disable_notification", disable_notification);
        self.invoke("forwardMessage", params).await
    }

    // ── Media ──────────────────────────────────────────────────────────────

    async fn send_media(
        &self,
        method:  &'static str,
        field:   &'static str,
        chat_id: ChatId,
        file:    InputFile,
        extra:   impl FnOnce(Params) -> Params,
        opts:    &SendOptions,
    ) -> Result<Message, InvocationError> {
        let params = Params::new()
            .with("chat_id", chat_id)
            .part(field, file.into_part().await?);
        self.invoke(method, opts.apply(extra(params))).await
    }

    pub async fn send_photo(
        &self,
        chat_id: impl Into<ChatId>,
        photo:   InputFile,
        caption: Option<&str>,
        opts:    &SendOptions,
    ) -> Result<Message, InvocationError> {
        self.send_media("sendPhoto", "photo", chat_id.into(), photo, |p| p.opt("caption", caption), opts)
            .await
    }

    /// Send an MP3 to be shown in the music player.
    pub async fn send_audio(
        &self,
        chat_id: impl Into<ChatId>,
        audio:   InputFile,
        meta:    &AudioMeta,
        opts:    &SendOptions,
    ) -> Result<Message, InvocationError> {
        let extra = |p: Params| {
            p.opt("duration", meta.duration)
                .opt("performer", meta.performer.as_deref())
                .opt("title", meta.title.as_deref())
        };
        self.send_media("sendAudio", "audio", chat_id.into(), audio, extra, opts).await
    }

    pub async fn send_document(
        &self,
        chat_id:  impl Into<ChatId>,
        document: InputFile,
        caption:  Option<&str>,
        opts:     &SendOptions,
    ) -> Result<Message, InvocationError> {
        self.send_media("sendDocument", "document", chat_id.into(), document, |p| p.opt("caption", caption), opts)
            .await
    }

    pub async fn send_sticker(
        &self,
        chat_id: impl Into<ChatId>,
        sticker: InputFile,
        opts:    &SendOptions,
    ) -> Result<Message, InvocationError> {
        self.send_media("sendSticker", "sticker", chat_id.into(), sticker, |p| p, opts).await
    }

    pub async fn send_video(
        &self,
        chat_id: impl Into<ChatId>,
        video:   InputFile,
        meta:    &VideoMeta,
        opts:    &SendOptions,
    ) -> Result<Message, InvocationError> {
        let extra = |p: Params| {
            p.opt("duration", meta.duration)
                .opt("width", meta.width)
                .opt("height", meta.height)
                .opt("caption", meta.caption.as_deref())
        };
        self.send_media("sendVideo", "video", chat_id.into(), video, extra, opts).await
    }

    /// Send an OGG/OPUS voice note.
    pub async fn send_voice(
        &self,
        chat_id:  impl Into<ChatId>,
        voice:    InputFile,
        duration: Option<i32>,
        opts:     &SendOptions,
    ) -> Result<Message, InvocationError> {
        self.send_media("sendVoice", "voice", chat_id.into(), voice, |p| p.opt("duration", duration), opts)
            .await
    }

    // ── Places & people ────────────────────────────────────────────────────

    pub async fn send_location(
        &self,
        chat_id:   impl Into<ChatId>,
        latitude:  f64,
        longitude: f64,
        opts:      &SendOptions,
    ) -> Result<Message, InvocationError> {
        let params = Params::new()
            .with("chat_id", chat_id.into())
            .with("latitude", latitude)
            .with("longitude", longitude);
        self.invoke("sendLocation", opts.apply(params)).await
    }

    pub async fn send_venue(
        &self,
        chat_id:       impl Into<ChatId>,
        latitude:      f64,
        longitude:     f64,
        title:         &str,
        address:       &str,
        foursquare_id: Option<&str>,
        opts:          &SendOptions,
    ) -> Result<Message, InvocationError> {
        let params = Params::new()
            .with("chat_id", chat_id.into())
            .with("latitude", latitude)
            .with("longitude", longitude)
            .with("title", title)
            .with("address", address)
            .opt("foursquare_id", foursquare_id);
        self.invoke("sendVenue", opts.apply(params)).await
    }

    pub async fn send_contact(
        &self,
        chat_id:      impl Into<ChatId>,
        phone_number: &str,
        first_name:   &str,
        last_name:    Option<&str>,
        opts:         &SendOptions,
    ) -> Result<Message, InvocationError> {
        let params = Params::new()
            .with("chat_id", chat_id.into())
            .with("phone_number", phone_number)
            .with("first_name", first_name)
            .opt("last_name", last_name);
        self.invoke("sendContact", opts.apply(params)).await
    }

    /// Show a status such as "typing…" for up to five seconds.
    pub async fn send_chat_action(
        &self,
        chat_id: impl Into<ChatId>,
        action:  ChatAction,
    ) -> Result<bool, InvocationError> {
        let params = Params::new().with("chat_id", chat_id.into()).with("action", action);
        self.invoke("sendChatAction", params).await
    }

    // ── Users & files ──────────────────────────────────────────────────────

    pub async fn get_user_profile_photos(
        &self,
        user_id: i64,
        offset:  Option<i32>,
        limit:   Option<i32>,
    ) -> Result<UserProfilePhotos, InvocationError> {
        let params = Params::new()
            .with("user_id", user_id)
            .opt("offset", offset)
            .opt("limit", limit);
        self.invoke("getUserProfilePhotos", params).await
    }

    /// Prepare a file for download; see [`Client::file_url`].
    pub async fn get_file(&self, file_id: &str) -> Result<File, InvocationError> {
        self.invoke("getFile", Params::new().with("file_id", file_id)).await
    }

    /// Download link for a file returned by [`Client::get_file`].
    ///
    /// `None` when the file has no `file_path` (it is too big, or the link
    /// has not been requested yet).
    pub fn file_url(&self, file: &File) -> Option<String> {
        let path = file.file_path.as_deref()?;
        Some(format!("{}/file/bot{}/{path}", self.inner.api_url, self.inner.token))
    }

    // ── Moderation ─────────────────────────────────────────────────────────

    pub async fn kick_chat_member(&self, chat_id: impl Into<ChatId>, user_id: i64) -> Result<bool, InvocationError> {
        let params = Params::new().with("chat_id", chat_id.into()).with("user_id", user_id);
        self.invoke("kickChatMember", params).await
    }

    pub async fn unban_chat_member(&self, chat_id: impl Into<ChatId>, user_id: i64) -> Result<bool, InvocationError> {
        let params = Params::new().with("chat_id", chat_id.into()).with("user_id", user_id);
        self.invoke("unbanChatMember", params).await
    }

    // ── Callbacks & inline mode ────────────────────────────────────────────

    /// Acknowledge a callback button press, optionally with a notification.
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text:              Option<&str>,
        show_alert:        Option<bool>,
    ) -> Result<bool, InvocationError> {
        let params = Params::new()
            .with("callback_query_id", callback_query_id)
            .opt("text", text)
            .opt("show_alert", show_alert);
        self.invoke("answerCallbackQuery", params).await
    }

    /// Answer an inline query. At most 50 results are allowed per answer.
    pub async fn answer_inline_query(
        &self,
        inline_query_id: &str,
        results:         &[InlineQueryResult],
        answer:          &InlineAnswer,
    ) -> Result<bool, InvocationError> {
        let params = Params::new()
            .with("inline_query_id", inline_query_id)
            .results("results", results);
        self.invoke("answerInlineQuery", answer.apply(params)).await
    }

    // ── Edits ──────────────────────────────────────────────────────────────

    pub async fn edit_message_text(
        &self,
        target: &MessageRef,
        text:   &str,
        opts:   &EditTextOptions,
    ) -> Result<EditResult, InvocationError> {
        let params = target
            .apply(Params::new())
            .with("text", text)
            .opt("parse_mode", opts.parse_mode)
            .opt("disable_web_page_preview", opts.disable_web_page_preview)
            .markup("reply_markup", opts.reply_markup.as_ref());
        self.invoke("editMessageText", params).await
    }

    pub async fn edit_message_caption(
        &self,
        target:       &MessageRef,
        caption:      Option<&str>,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<EditResult, InvocationError> {
        let params = target
            .apply(Params::new())
            .opt("caption", caption)
            .markup("reply_markup", reply_markup);
        self.invoke("editMessageCaption", params).await
    }

    pub async fn edit_message_reply_markup(
        &self,
        target:       &MessageRef,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<EditResult, InvocationError> {
        let params = target.apply(Params::new()).markup("reply_markup", reply_markup);
        self.invoke("editMessageReplyMarkup", params).await
    }
}

fn updates_params(offset: Option<i64>, limit: Option<i32>, timeout: Option<i32>) -> Params {
    Params::new()
        .opt("offset", offset)
        .opt("limit", limit)
        .opt("timeout", timeout)
}
