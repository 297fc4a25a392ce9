use serde_json::{Value, json};
use tbo_types::deserialize::Error;
use tbo_types::inline_result::{InlineQueryResultArticle, InlineQueryResultPhoto, InlineQueryResultVenue};
use tbo_types::markup::{
    ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardHide,
    ReplyKeyboardMarkup,
};
use tbo_types::types::*;
use tbo_types::{
    AsReplyMarkup, Deserializable, InlineQueryResult, InputMessageContent, ParseMode, ReplyMarkup,
    Serializable, Tagged,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn roundtrip<T: Serializable + Deserializable + PartialEq + std::fmt::Debug>(x: &T) {
    let back = T::from_json(&x.to_json()).unwrap();
    assert_eq!(&back, x);
}

/// Every key in `required` must fail the decode when removed, and every
/// other key must be safe to remove.
fn check_presence<T: Deserializable + std::fmt::Debug>(full: Value, required: &[&str]) {
    let map = full.as_object().unwrap();
    T::from_value(&full).unwrap();

    for key in map.keys() {
        let mut partial = map.clone();
        partial.remove(key);
        let result = T::from_value(&Value::Object(partial));
        if required.contains(&key.as_str()) {
            match result {
                Err(Error::MissingField { field, .. }) => assert_eq!(field, key.as_str()),
                other => panic!("removing `{key}` should fail, got {other:?}"),
            }
        } else {
            assert!(result.is_ok(), "removing optional `{key}` failed: {result:?}");
        }
    }
}

fn user(id: i64) -> User {
    User { id, first_name: "Ada".into(), last_name: Some("Lovelace".into()), username: Some("ada".into()) }
}

fn chat() -> Chat {
    Chat { id: -100, kind: ChatType::Supergroup, title: Some("Engines".into()), ..Default::default() }
}

fn photo(id: &str, w: i32) -> PhotoSize {
    PhotoSize { file_id: id.into(), width: w, height: w, file_size: Some(1024) }
}

// ── Round-trips ───────────────────────────────────────────────────────────────

#[test]
fn roundtrip_user_full_and_bare() {
    roundtrip(&user(1));
    roundtrip(&User { id: 2, first_name: "B".into(), ..Default::default() });
}

#[test]
fn roundtrip_media() {
    roundtrip(&photo("p", 90));
    roundtrip(&Audio { file_id: "a".into(), duration: 30, title: Some("Song".into()), ..Default::default() });
    roundtrip(&Document {
        file_id: "d".into(),
        thumb: Some(photo("t", 40)),
        file_name: Some("x.pdf".into()),
        mime_type: Some("application/pdf".into()),
        file_size: Some(10),
    });
    roundtrip(&Sticker { file_id: "s".into(), width: 512, height: 512, ..Default::default() });
    roundtrip(&Video { file_id: "v".into(), width: 1, height: 2, duration: 3, ..Default::default() });
    roundtrip(&Voice { file_id: "vo".into(), duration: 4, mime_type: Some("audio/ogg".into()), file_size: None });
    roundtrip(&Contact { phone_number: "+1".into(), first_name: "C".into(), last_name: None, user_id: Some(5) });
    roundtrip(&Venue {
        location: Location { longitude: 12.5, latitude: 41.9 },
        title: "Colosseum".into(),
        address: "Piazza del Colosseo".into(),
        foursquare_id: None,
    });
    roundtrip(&File { file_id: "f".into(), file_size: None, file_path: Some("photos/1.jpg".into()) });
}

#[test]
fn roundtrip_full_message() {
    let msg = Message {
        message_id: 10,
        date: 1_464_000_000,
        chat: chat(),
        from: Some(user(1)),
        forward_from: Some(user(2)),
        forward_date: Some(1_463_999_000),
        text: Some("/start hello".into()),
        entities: Some(vec![MessageEntity { kind: "bot_command".into(), offset: 0, length: 6, url: None }]),
        photo: Some(vec![photo("a", 90), photo("b", 320)]),
        caption: Some("cap".into()),
        new_chat_photo: Some(vec![]),
        group_chat_created: Some(true),
        migrate_to_chat_id: Some(-1001),
        pinned_message: Some(Box::new(Message { message_id: 3, chat: chat(), ..Default::default() })),
        ..Default::default()
    };
    roundtrip(&msg);
}

#[test]
fn roundtrip_update_payloads() {
    let query = InlineQuery {
        id: "q".into(),
        from: user(1),
        query: "cats".into(),
        offset: "".into(),
        location: Some(Location { longitude: 0.0, latitude: 0.0 }),
    };
    roundtrip(&Update { update_id: 1, inline_query: Some(query), ..Default::default() });

    let callback = CallbackQuery {
        id: "c".into(),
        from: user(1),
        message: None,
        inline_message_id: Some("im".into()),
        data: Some("yes".into()),
    };
    roundtrip(&Update { update_id: 2, callback_query: Some(callback), ..Default::default() });

    let chosen = ChosenInlineResult {
        result_id: "r".into(),
        from: user(3),
        query: "q".into(),
        location: None,
        inline_message_id: None,
    };
    roundtrip(&Update { update_id: 3, chosen_inline_result: Some(chosen), ..Default::default() });
}

#[test]
fn roundtrip_profile_photos_keeps_both_levels() {
    let photos = UserProfilePhotos {
        total_count: 2,
        photos: vec![vec![photo("a1", 90), photo("a2", 320)], vec![], vec![photo("c1", 90)]],
    };
    roundtrip(&photos);
}

#[test]
fn roundtrip_inline_results() {
    let results: Vec<InlineQueryResult> = vec![
        InlineQueryResultArticle {
            url: Some("https://example.org".into()),
            hide_url: Some(false),
            reply_markup: Some(InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback("ok", "1")]])),
            ..InlineQueryResultArticle::new("1", "Title", InputMessageContent::text("body"))
        }
        .into(),
        InlineQueryResultPhoto::new("2", "https://x/p.jpg", "https://x/t.jpg").into(),
        InlineQueryResultVenue {
            id: "3".into(),
            latitude: 1.0,
            longitude: 2.0,
            title: "V".into(),
            address: "A".into(),
            input_message_content: Some(InputMessageContent::text("here")),
            ..Default::default()
        }
        .into(),
    ];
    for r in &results {
        roundtrip(r);
    }
}

// ── Field presence ────────────────────────────────────────────────────────────

#[test]
fn presence_user() {
    check_presence::<User>(
        json!({ "id": 1, "first_name": "A", "last_name": "B", "username": "ab" }),
        &["id", "first_name"],
    );
}

#[test]
fn presence_chat() {
    check_presence::<Chat>(
        json!({ "id": 1, "type": "group", "title": "T", "username": "u", "first_name": "f", "last_name": "l" }),
        &["id", "type"],
    );
}

#[test]
fn presence_message() {
    check_presence::<Message>(
        json!({
            "message_id": 1,
            "date": 2,
            "chat": { "id": 3, "type": "private" },
            "from": { "id": 4, "first_name": "F" },
            "text": "hi",
            "entities": [{ "type": "bold", "offset": 0, "length": 2 }],
            "delete_chat_photo": true
        }),
        &["message_id", "date", "chat"],
    );
}

#[test]
fn presence_media() {
    check_presence::<Audio>(
        json!({ "file_id": "a", "duration": 1, "performer": "p", "title": "t", "mime_type": "m", "file_size": 2 }),
        &["file_id", "duration"],
    );
    check_presence::<Video>(
        json!({ "file_id": "v", "width": 1, "height": 2, "duration": 3, "mime_type": "video/mp4" }),
        &["file_id", "width", "height", "duration"],
    );
    check_presence::<Location>(json!({ "longitude": 1.0, "latitude": 2.0 }), &["longitude", "latitude"]);
    check_presence::<Venue>(
        json!({ "location": { "longitude": 1.0, "latitude": 2.0 }, "title": "t", "address": "a", "foursquare_id": "f" }),
        &["location", "title", "address"],
    );
}

#[test]
fn presence_queries() {
    check_presence::<InlineQuery>(
        json!({ "id": "1", "from": { "id": 1, "first_name": "A" }, "query": "q", "offset": "", "location": { "longitude": 0, "latitude": 0 } }),
        &["id", "from", "query", "offset"],
    );
    check_presence::<CallbackQuery>(
        json!({ "id": "1", "from": { "id": 1, "first_name": "A" }, "data": "d", "inline_message_id": "m" }),
        &["id", "from"],
    );
}

#[test]
fn presence_keyboards() {
    check_presence::<ReplyKeyboardMarkup>(
        json!({ "keyboard": [[{ "text": "A" }]], "resize_keyboard": true, "one_time_keyboard": false, "selective": true }),
        &["keyboard"],
    );
    check_presence::<InlineKeyboardButton>(
        json!({ "text": "A", "url": "https://example.org" }),
        &["text"],
    );
}

#[test]
fn optional_key_decodes_as_none() {
    let u = User::from_json(r#"{"id":1,"first_name":"A"}"#).unwrap();
    assert_eq!(u.last_name, None);
    assert_eq!(u.username, None);
    assert_eq!(u.to_json(), r#"{"id":1,"first_name":"A"}"#);
}

#[test]
fn missing_field_inside_nested_names_inner_type() {
    let err = Message::from_json(r#"{"message_id":1,"date":2,"chat":{"id":3}}"#).unwrap_err();
    assert_eq!(err, Error::MissingField { ty: "Chat", field: "type" });
}

#[test]
fn wrong_shapes_are_rejected() {
    assert_eq!(User::from_json("[1]").unwrap_err(), Error::NotAnObject { ty: "User" });
    assert!(matches!(User::from_json("{"), Err(Error::Syntax(_))));
    assert_eq!(
        Chat::from_json(r#"{"id":1,"type":7}"#).unwrap_err(),
        Error::InvalidValue { ty: "Chat", field: "type", expected: "string" }
    );
}

#[test]
fn unknown_chat_kind_is_kept() {
    let chat = Chat::from_json(r#"{"id":1,"type":"forum"}"#).unwrap();
    assert_eq!(chat.kind, ChatType::Other("forum".into()));
    assert_eq!(chat.kind.as_str(), "forum");
    assert!(!chat.is_private());
    assert_eq!(chat.to_json(), r#"{"id":1,"type":"forum"}"#);

    let msg = Message::from_json(r#"{"message_id":1,"date":0,"chat":{"id":1,"type":"forum"},"text":"hi"}"#).unwrap();
    assert_eq!(msg.text.as_deref(), Some("hi"));
}

// ── Array of arrays ───────────────────────────────────────────────────────────

#[test]
fn keyboard_rows_keep_order() {
    let json = r#"{"keyboard":[[{"text":"A"},{"text":"B"}],[{"text":"C"}]]}"#;
    let kb = ReplyKeyboardMarkup::from_json(json).unwrap();

    let rows: Vec<Vec<&str>> =
        kb.keyboard.iter().map(|row| row.iter().map(|b| b.text.as_str()).collect()).collect();
    assert_eq!(rows, vec![vec!["A", "B"], vec!["C"]]);
    assert_eq!(kb.to_json(), json);
}

#[test]
fn keyboard_empty_rows_survive() {
    let kb = ReplyKeyboardMarkup::new(vec![vec![], vec![KeyboardButton::new("x")], vec![]]);
    assert_eq!(kb.to_json(), r#"{"keyboard":[[],[{"text":"x"}],[]]}"#);
    roundtrip(&kb);
}

// ── Discriminators ────────────────────────────────────────────────────────────

#[test]
fn photo_result_always_tagged_photo() {
    let r = InlineQueryResultPhoto {
        title: Some("video".into()),
        description: Some("type".into()),
        ..InlineQueryResultPhoto::new("1", "https://x/p.jpg", "https://x/t.jpg")
    };
    let value = r.to_value();
    assert_eq!(value["type"], "photo");
    assert_eq!(InlineQueryResultPhoto::TYPE, "photo");
    assert_eq!(value.as_object().unwrap().keys().next().map(String::as_str), Some("type"));
}

fn is_cached(r: &InlineQueryResult) -> bool {
    use InlineQueryResult as R;
    matches!(
        r,
        R::CachedPhoto(_) | R::CachedGif(_) | R::CachedMpeg4Gif(_) | R::CachedSticker(_)
            | R::CachedDocument(_) | R::CachedVideo(_) | R::CachedVoice(_) | R::CachedAudio(_)
    )
}

#[test]
fn every_inline_result_variant_decodes_to_itself() {
    let cases: &[(&str, &str, bool)] = &[
        (r#"{"type":"article","id":"1","title":"T","input_message_content":{"message_text":"hi"}}"#, "article", false),
        (r#"{"type":"photo","id":"2","photo_url":"http://p/1.jpg","thumb_url":"http://p/t.jpg"}"#, "photo", false),
        (r#"{"type":"gif","id":"3","gif_url":"http://g/1.gif","thumb_url":"http://g/t.jpg"}"#, "gif", false),
        (r#"{"type":"mpeg4_gif","id":"4","mpeg4_url":"http://m/1.mp4","thumb_url":"http://m/t.jpg"}"#, "mpeg4_gif", false),
        (r#"{"type":"video","id":"5","video_url":"http://v/1.mp4","mime_type":"video/mp4","thumb_url":"http://v/t.jpg","title":"V"}"#, "video", false),
        (r#"{"type":"audio","id":"6","audio_url":"http://a/1.mp3","title":"A"}"#, "audio", false),
        (r#"{"type":"voice","id":"7","voice_url":"http://a/1.ogg","title":"Vo"}"#, "voice", false),
        (r#"{"type":"document","id":"8","title":"D","document_url":"http://d/1.pdf","mime_type":"application/pdf"}"#, "document", false),
        (r#"{"type":"location","id":"9","latitude":1.5,"longitude":2.5,"title":"L"}"#, "location", false),
        (r#"{"type":"venue","id":"10","latitude":1.5,"longitude":2.5,"title":"Ve","address":"Main St"}"#, "venue", false),
        (r#"{"type":"contact","id":"11","phone_number":"+1","first_name":"C"}"#, "contact", false),
        (r#"{"type":"photo","id":"12","photo_file_id":"P"}"#, "photo", true),
        (r#"{"type":"gif","id":"13","gif_file_id":"G"}"#, "gif", true),
        (r#"{"type":"mpeg4_gif","id":"14","mpeg4_file_id":"M"}"#, "mpeg4_gif", true),
        (r#"{"type":"sticker","id":"15","sticker_file_id":"S"}"#, "sticker", true),
        (r#"{"type":"document","id":"16","title":"D","document_file_id":"F"}"#, "document", true),
        (r#"{"type":"video","id":"17","video_file_id":"V","title":"V"}"#, "video", true),
        (r#"{"type":"voice","id":"18","voice_file_id":"O","title":"Vo"}"#, "voice", true),
        (r#"{"type":"audio","id":"19","audio_file_id":"A"}"#, "audio", true),
    ];

    let mut seen = std::collections::HashSet::new();
    for &(json, tag, cached) in cases {
        let r = InlineQueryResult::from_json(json).unwrap_or_else(|e| panic!("{json}: {e}"));
        assert_eq!(r.kind(), tag, "{json}");
        assert_eq!(is_cached(&r), cached, "{json}");
        assert_eq!(r.to_json(), json);
        seen.insert(std::mem::discriminant(&r));
    }
    assert_eq!(seen.len(), 19);
}

#[test]
fn sticker_results_are_always_cached() {
    assert_eq!(
        InlineQueryResult::from_json(r#"{"type":"sticker","id":"1","sticker_url":"http://s/1.webp"}"#).unwrap_err(),
        Error::MissingField { ty: "InlineQueryResultCachedSticker", field: "sticker_file_id" }
    );
}

#[test]
fn url_result_without_file_id_reports_url_type() {
    assert_eq!(
        InlineQueryResult::from_json(r#"{"type":"gif","id":"1","gif_url":"http://g/1.gif"}"#).unwrap_err(),
        Error::MissingField { ty: "InlineQueryResultGif", field: "thumb_url" }
    );
    assert_eq!(
        InlineQueryResult::from_json(r#"{"type":"reel","id":"1"}"#).unwrap_err(),
        Error::UnknownVariant { ty: "InlineQueryResult", tag: "reel".into() }
    );
}

#[test]
fn results_array_encodes_per_variant_tags() {
    let results: Vec<InlineQueryResult> = vec![
        InlineQueryResultArticle::new("1", "t", InputMessageContent::text("x")).into(),
        InlineQueryResultPhoto::new("2", "u", "t").into(),
    ];
    let tags: Vec<&str> = results.iter().map(InlineQueryResult::kind).collect();
    assert_eq!(tags, ["article", "photo"]);
    let arr: Vec<Value> = results.iter().map(Serializable::to_value).collect();
    assert_eq!(arr[0]["type"], "article");
    assert_eq!(arr[1]["type"], "photo");
}

// ── Reply markup ──────────────────────────────────────────────────────────────

#[test]
fn inline_keyboard_wire_fragment() {
    let markup = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::new("A")]]);
    let fragment = markup.to_wire_fragment();
    assert_eq!(fragment, r#"{"inline_keyboard":[[{"text":"A"}]]}"#);
    assert_eq!(ReplyMarkup::from(markup).to_wire_fragment(), fragment);
}

#[test]
fn flag_markups_wire_fragments() {
    assert_eq!(ReplyKeyboardHide { selective: Some(true) }.to_wire_fragment(), r#"{"hide_keyboard":true,"selective":true}"#);
    assert_eq!(ForceReply::default().to_wire_fragment(), r#"{"force_reply":true}"#);
}

#[test]
fn inline_result_nests_markup_as_object() {
    let r = InlineQueryResultArticle {
        reply_markup: Some(InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url("go", "https://t.me")]])),
        ..InlineQueryResultArticle::new("1", "t", InputMessageContent::text("x"))
    };
    assert!(r.to_value()["reply_markup"].is_object());
}

// ── Self-reference ────────────────────────────────────────────────────────────

#[test]
fn reply_to_message_two_levels() {
    let json = json!({
        "message_id": 2,
        "date": 20,
        "chat": { "id": 1, "type": "private" },
        "text": "outer",
        "reply_to_message": {
            "message_id": 1,
            "date": 10,
            "chat": { "id": 1, "type": "private" },
            "caption": "inner",
            "photo": [{ "file_id": "p", "width": 1, "height": 1 }]
        }
    });
    let msg = Message::from_value(&json).unwrap();
    let inner = msg.reply_to_message.as_deref().unwrap();

    assert_eq!(msg.text.as_deref(), Some("outer"));
    assert_eq!(msg.caption, None);
    assert_eq!(inner.text, None);
    assert_eq!(inner.caption.as_deref(), Some("inner"));
    assert!(inner.reply_to_message.is_none());
    assert!(matches!(inner.content(), Some(MessageContent::Photo(p)) if p.len() == 1));
    assert_eq!(msg.to_value(), json);
}

// ── Update envelope ───────────────────────────────────────────────────────────

#[test]
fn update_with_only_message() {
    let upd = Update::from_json(
        r#"{"update_id":7,"message":{"message_id":1,"date":0,"chat":{"id":1,"type":"private"},"text":"hi"}}"#,
    )
    .unwrap();
    assert!(upd.message.is_some());
    assert!(upd.inline_query.is_none());
    assert!(upd.chosen_inline_result.is_none());
    assert!(upd.callback_query.is_none());
    assert!(matches!(upd.payload(), Some(UpdatePayload::Message(m)) if m.text.as_deref() == Some("hi")));
}

#[test]
fn update_without_payload() {
    let upd = Update::from_json(r#"{"update_id":8}"#).unwrap();
    assert_eq!(upd.payload(), None);
}

// ── Input message content ─────────────────────────────────────────────────────

#[test]
fn input_text_content_fields() {
    let json = r#"{"message_text":"<b>x</b>","parse_mode":"HTML","disable_web_page_preview":true}"#;
    let content = InputMessageContent::from_json(json).unwrap();
    match &content {
        InputMessageContent::Text(t) => assert_eq!(t.parse_mode, Some(ParseMode::Html)),
        other => panic!("expected text content, got {other:?}"),
    }
    assert_eq!(content.to_json(), json);
}

// ── serde bridge ──────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
#[test]
fn serde_goes_through_the_wire_codec() {
    let msg = Message::from_json(
        r#"{"message_id":3,"date":0,"chat":{"id":7,"type":"group","title":"G"},"text":"hi"}"#,
    )
    .unwrap();
    assert_eq!(serde_json::to_string(&msg).unwrap(), msg.to_json());
    assert_eq!(serde_json::from_str::<Message>(&msg.to_json()).unwrap(), msg);

    let json = r#"{"type":"gif","id":"13","gif_file_id":"G"}"#;
    let r: InlineQueryResult = serde_json::from_str(json).unwrap();
    assert!(matches!(r, InlineQueryResult::CachedGif(_)));
    assert_eq!(serde_json::to_string(&r).unwrap(), json);

    let err = serde_json::from_str::<Chat>(r#"{"id":1}"#).unwrap_err();
    assert!(err.to_string().contains("missing required field `type`"), "{err}");
}
