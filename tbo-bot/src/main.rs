//! tbo-bot: showcase bot built with tbo-client.
//!
//! # Setup
//! 1. Get a token from @BotFather.
//! 2. `TBO_TOKEN=123456:ABC-DEF cargo run -p tbo-bot`

use std::time::Instant;

use chrono::Utc;
use tbo_client::{
    ChatAction, ChatId, Client, Config, EditTextOptions, InlineAnswer, InputFile, MessageRef,
    ParseMode, SendOptions,
};
use tbo_types::inline_result::InlineQueryResultArticle;
use tbo_types::markup::{ForceReply, InlineKeyboardButton, InlineKeyboardMarkup};
use tbo_types::types::{CallbackQuery, InlineQuery, Message, MessageContent, Update, UpdatePayload, User};
use tbo_types::{InlineQueryResult, InputMessageContent};

const TOKEN_VAR: &str = "TBO_TOKEN";
const DOCS_URL:  &str = "https://core.telegram.org/bots/api";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("tbo_client=info,tbo_bot=info"))
        .init();
    if let Err(e) = run().await {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var(TOKEN_VAR).map_err(|_| format!("set {TOKEN_VAR} to your bot token"))?;

    println!("🔌 Connecting…");
    let client = Client::connect(Config::new(token)).await?;
    let me = client.me().clone();
    println!("✅ Running as @{} (id={})", me.username.as_deref().unwrap_or("bot"), me.id);
    println!("👂 Listening for updates… (Ctrl+C to quit)\n");

    let mut updates = client.stream_updates();
    while let Some(update) = updates.next().await {
        let client = client.clone();
        let me     = me.clone();
        // One task per update so a slow handler never stalls polling.
        tokio::spawn(async move {
            dispatch(update, client, me).await;
        });
    }

    Ok(())
}

// ─── Central dispatcher ───────────────────────────────────────────────────────

async fn dispatch(update: Update, client: Client, me: User) {
    let result = match update.payload() {
        Some(UpdatePayload::Message(msg))        => on_message(&client, &me, msg).await,
        Some(UpdatePayload::CallbackQuery(cb))   => on_callback(&client, cb).await,
        Some(UpdatePayload::InlineQuery(iq))     => on_inline_query(&client, iq).await,
        Some(UpdatePayload::ChosenInlineResult(r)) => {
            tracing::info!("inline result {} chosen by {}", r.result_id, r.from.id);
            Ok(())
        }
        None => Ok(()),
    };
    if let Err(e) = result {
        tracing::warn!("update {} failed: {e}", update.update_id);
    }
}

type HandlerResult = Result<(), tbo_client::InvocationError>;

async fn on_message(client: &Client, me: &User, msg: &Message) -> HandlerResult {
    let chat  = ChatId::from(&msg.chat);
    let reply = SendOptions::new().reply_to(msg.message_id);

    let text = match msg.content() {
        Some(MessageContent::Text(t)) => t.trim().to_owned(),
        Some(MessageContent::Location(loc)) => {
            let text = format!("📍 {:.5}, {:.5}", loc.latitude, loc.longitude);
            return client.send_message(chat, &text, None, None, &reply).await.map(drop);
        }
        Some(MessageContent::Photo(_)) => {
            let best = msg.largest_photo().map(|p| p.file_id.clone()).unwrap_or_default();
            return client
                .send_photo(chat, InputFile::id(best), Some("🖼 Right back at you"), &reply)
                .await
                .map(drop);
        }
        _ => return Ok(()),
    };

    let Some((cmd, arg)) = split_command(&text, me.username.as_deref().unwrap_or("")) else {
        return client.send_message(chat, &text, None, None, &reply).await.map(drop);
    };

    match cmd.as_str() {
        "/start"   => handle_start(client, chat, &reply).await,
        "/help"    => handle_help(client, chat, &reply).await,
        "/ping"    => handle_ping(client, chat, &reply).await,
        "/id"      => handle_id(client, chat, &reply, msg).await,
        "/echo"    => handle_echo(client, chat, &reply, &arg).await,
        "/upper"   => handle_transform(client, chat, &reply, &arg, str::to_uppercase).await,
        "/lower"   => handle_transform(client, chat, &reply, &arg, str::to_lowercase).await,
        "/reverse" => handle_transform(client, chat, &reply, &arg, |s| s.chars().rev().collect()).await,
        "/time"    => handle_time(client, chat, &reply).await,
        "/ask"     => {
            let opts = reply.reply_markup(ForceReply::default());
            client.send_message(chat, "✍️ What's on your mind?", None, None, &opts).await.map(drop)
        }
        "/source"  => {
            client.send_chat_action(chat.clone(), ChatAction::UploadDocument).await?;
            let code = include_bytes!("main.rs").to_vec();
            client
                .send_document(chat, InputFile::memory("main.rs", code), Some("📄 This bot"), &reply)
                .await
                .map(drop)
        }
        _ => {
            client
                .send_message(chat, "❓ Unknown command. Use /help to see all commands.", None, None, &reply)
                .await
                .map(drop)
        }
    }
}

async fn on_callback(client: &Client, cb: &CallbackQuery) -> HandlerResult {
    let (text, alert) = match cb.data.as_deref() {
        Some("cb:ping")  => ("🏓 Pong!".to_owned(), false),
        Some("cb:time")  => (Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(), false),
        Some("cb:about") => ("Built with tbo, a Rust Bot API client 🦀".to_owned(), true),
        _                => ("🤷 Unknown action".to_owned(), false),
    };
    client.answer_callback_query(&cb.id, Some(&text), Some(alert)).await?;

    // Stamp the message the button belongs to.
    if let Some(msg) = &cb.message {
        let target = MessageRef::chat(&msg.chat, msg.message_id);
        let opts = EditTextOptions { reply_markup: Some(start_keyboard()), ..Default::default() };
        client.edit_message_text(&target, &format!("Last: {text}"), &opts).await?;
    }
    Ok(())
}

async fn on_inline_query(client: &Client, iq: &InlineQuery) -> HandlerResult {
    let q = iq.query.trim();
    let results: Vec<InlineQueryResult> = if q.is_empty() {
        vec![
            article("1", "🕐 Current Time", &Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            article("2", "🤖 About tbo-bot", "Built with tbo, a Rust Bot API client 🦀"),
        ]
    } else {
        let rev: String = q.chars().rev().collect();
        vec![
            article("u", &format!("UPPER: {}", q.to_uppercase()), &q.to_uppercase()),
            article("l", &format!("lower: {}", q.to_lowercase()), &q.to_lowercase()),
            article("r", &format!("Reversed: {rev}"), &rev),
        ]
    };
    let answer = InlineAnswer { cache_time: Some(30), ..Default::default() };
    client.answer_inline_query(&iq.id, &results, &answer).await.map(drop)
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

async fn handle_start(client: &Client, chat: ChatId, reply: &SendOptions) -> HandlerResult {
    let text = "👋 *Welcome to tbo-bot!*\n\n\
        Showcase bot built with *tbo*, a Telegram Bot API client in Rust 🦀\n\n\
        Use the buttons below or send /help for all commands.";
    let opts = reply.clone().reply_markup(start_keyboard());
    client.send_message(chat, text, Some(ParseMode::Markdown), None, &opts).await.map(drop)
}

async fn handle_help(client: &Client, chat: ChatId, reply: &SendOptions) -> HandlerResult {
    let text = "📖 *Commands*\n\n\
        /ping, latency 🏓\n\
        /time, UTC date & time 🕐\n\
        /echo `<text>`, echo text\n\
        /upper `<text>`, UPPERCASE\n\
        /lower `<text>`, lowercase\n\
        /reverse `<text>`, esreveR\n\
        /id, your & chat IDs\n\
        /ask, force a reply\n\
        /source, this bot's code\n\n\
        *Inline:* `@bot <text>` in any chat";
    client.send_message(chat, text, Some(ParseMode::Markdown), Some(true), reply).await.map(drop)
}

async fn handle_ping(client: &Client, chat: ChatId, reply: &SendOptions) -> HandlerResult {
    let start = Instant::now();
    let sent = client.send_message(chat, "🏓 …", None, None, reply).await?;
    let ms = start.elapsed().as_millis();
    let target = MessageRef::chat(&sent.chat, sent.message_id);
    let opts = EditTextOptions { parse_mode: Some(ParseMode::Markdown), ..Default::default() };
    client.edit_message_text(&target, &format!("🏓 *Pong!* `{ms} ms`"), &opts).await.map(drop)
}

async fn handle_id(client: &Client, chat: ChatId, reply: &SendOptions, msg: &Message) -> HandlerResult {
    let user = match &msg.from {
        Some(u) => format!("`{}`", u.id),
        None    => "_(unknown)_".to_owned(),
    };
    let text = format!("🪪 *IDs*\n\n*User:* {user}\n*Chat:* `{}` _({})_", msg.chat.id, msg.chat.kind.as_str());
    client.send_message(chat, &text, Some(ParseMode::Markdown), None, reply).await.map(drop)
}

async fn handle_echo(client: &Client, chat: ChatId, reply: &SendOptions, arg: &str) -> HandlerResult {
    let text = if arg.is_empty() { "💬 Usage: /echo <text>" } else { arg };
    client.send_message(chat, text, None, None, reply).await.map(drop)
}

async fn handle_transform<F: Fn(&str) -> String>(
    client: &Client, chat: ChatId, reply: &SendOptions, arg: &str, f: F,
) -> HandlerResult {
    let text = if arg.is_empty() { "Usage: <command> <text>".to_owned() } else { f(arg) };
    client.send_message(chat, &text, None, None, reply).await.map(drop)
}

async fn handle_time(client: &Client, chat: ChatId, reply: &SendOptions) -> HandlerResult {
    let now  = Utc::now();
    let text = format!(
        "🕐 *Time*\n\n\
        *Date:* {}\n*Time:* `{}` UTC\n*Unix:* `{}`",
        now.format("%A, %B %d %Y"),
        now.format("%H:%M:%S"),
        now.timestamp(),
    );
    client.send_message(chat, &text, Some(ParseMode::Markdown), None, reply).await.map(drop)
}

// ─── Keyboards & inline results ───────────────────────────────────────────────

fn start_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("🏓 Ping", "cb:ping"),
            InlineKeyboardButton::callback("🕐 Time", "cb:time"),
        ],
        vec![InlineKeyboardButton::callback("ℹ️ About", "cb:about")],
        vec![InlineKeyboardButton::url("📚 Bot API docs", DOCS_URL)],
    ])
}

fn article(id: &str, title: &str, content: &str) -> InlineQueryResult {
    let mut result = InlineQueryResultArticle::new(id, title, InputMessageContent::text(content));
    result.description = Some(content.to_owned());
    result.into()
}

// ─── Utilities ────────────────────────────────────────────────────────────────

/// Splits `/cmd@bot rest` into `("/cmd", "rest")`. `None` for plain text or
/// for commands addressed to another bot.
fn split_command(text: &str, bot_username: &str) -> Option<(String, String)> {
    if !text.starts_with('/') { return None; }
    let (cmd_raw, rest) = text.split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((text, ""));
    let cmd = match cmd_raw.split_once('@') {
        Some((cmd, suffix)) if suffix.eq_ignore_ascii_case(bot_username) => cmd,
        Some(_) => return None,
        None    => cmd_raw,
    };
    Some((cmd.to_ascii_lowercase(), rest.to_owned()))
}
