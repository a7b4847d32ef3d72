use std::sync::{Arc, Mutex};
use std::time::Duration;

use tgsend::{
    BotClient, Configuration, Error, FileOptions, FormValue, InputFile, MediaKind, MessageOptions,
    OutboundRequest, ParseMode, Transport, VideoOptions,
};

/// Transport double that records every call and answers with a fixed body
struct RecordingTransport {
    body: String,
    calls: Mutex<Vec<(String, OutboundRequest)>>,
}

impl RecordingTransport {
    fn answering(body: &str) -> Arc<Self> {
        Arc::new(RecordingTransport {
            body: body.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn last(&self) -> (String, OutboundRequest) {
        self.calls.lock().unwrap().last().cloned().expect("no calls")
    }
}

impl Transport for RecordingTransport {
    fn post(&self, url: &str, request: &OutboundRequest) -> Result<String, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), request.clone()));
        Ok(self.body.clone())
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn bot_with(transport: Arc<RecordingTransport>) -> BotClient {
    init_logging();
    BotClient::with_transport(Configuration::new("123456:TEST_TOKEN"), transport)
}

fn temp_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file
}

#[test]
fn test_send_message_posts_to_method_url() {
    let transport = RecordingTransport::answering(r#"{"ok": true, "result": {"message_id": 7}}"#);
    let bot = bot_with(transport.clone());

    let options = MessageOptions {
        parse_mode: ParseMode::Markdown,
        ..Default::default()
    };
    assert!(bot
        .send_message("@mychannel", "hello **world**", &options)
        .unwrap());

    let (url, request) = transport.last();
    assert_eq!(url, "https://api.telegram.org/bot123456:TEST_TOKEN/sendMessage");
    assert_eq!(request.get("text"), Some(&FormValue::from("hello **world**")));
    assert_eq!(request.get("chat_id"), Some(&FormValue::from("@mychannel")));
    assert_eq!(request.get("disable_notification"), Some(&FormValue::Bool(false)));
}

#[test]
fn test_text_is_sent_literally() {
    let transport = RecordingTransport::answering(r#"{"ok": true}"#);
    let bot = bot_with(transport.clone());

    let text = "a_b *c* [d](e) <b>&amp;</b> ".repeat(300);
    bot.send_message("42", &text, &MessageOptions::default())
        .unwrap();

    let (_, request) = transport.last();
    assert_eq!(request.get("text"), Some(&FormValue::Text(text)));
}

#[test]
fn test_every_send_returns_ok_flag() {
    for (body, expected) in [(r#"{"ok": true}"#, true), (r#"{"ok": false}"#, false)] {
        let transport = RecordingTransport::answering(body);
        let bot = bot_with(transport.clone());
        let file = InputFile::memory("f.bin", vec![0, 1, 2]);

        assert_eq!(
            bot.send_message("1", "hi", &MessageOptions::default())
                .unwrap(),
            expected
        );
        assert_eq!(
            bot.send_document("1", &file, &FileOptions::default())
                .unwrap(),
            expected
        );
        assert_eq!(
            bot.send_photo("1", &file, &FileOptions::default()).unwrap(),
            expected
        );
        assert_eq!(
            bot.send_video("1", &file, &VideoOptions::default())
                .unwrap(),
            expected
        );
        assert_eq!(transport.call_count(), 4);
    }
}

#[test]
fn test_rejection_keeps_description_on_detailed_path() {
    let transport = RecordingTransport::answering(
        r#"{"ok": false, "error_code": 400, "description": "Bad Request: can't parse entities"}"#,
    );
    let bot = bot_with(transport);

    let request = BotClient::build_message_request("1", "*broken", &MessageOptions::default());
    let response = bot.execute(&request).unwrap();
    assert!(!response.ok);
    assert!(matches!(
        response.into_result(),
        Err(Error::Rejected { error_code: Some(400), .. })
    ));
}

#[test]
fn test_malformed_response_is_error_not_false() {
    let transport = RecordingTransport::answering("502 Bad Gateway");
    let bot = bot_with(transport);

    let result = bot.send_message("1", "hi", &MessageOptions::default());
    assert!(matches!(result, Err(Error::ResponseParse(_))));
}

#[test]
fn test_unknown_selector_short_circuits() {
    let transport = RecordingTransport::answering(r#"{"ok": true}"#);
    let bot = bot_with(transport.clone());
    let file = InputFile::memory("song.mp3", vec![1]);

    let sent = bot
        .send_file_named("audio", "1", &file, &FileOptions::default())
        .unwrap();
    assert!(!sent);
    assert_eq!(transport.call_count(), 0);

    assert!(bot
        .send_file_named("document", "1", &file, &FileOptions::default())
        .unwrap());
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn test_send_document_attaches_file_bytes() {
    let transport = RecordingTransport::answering(r#"{"ok": true, "result": {"document": {}}}"#);
    let bot = bot_with(transport.clone());
    let file = temp_file(b"%PDF-1.4 fake report");

    assert!(bot
        .send_document("@mychannel", &InputFile::path(file.path()), &FileOptions::default())
        .unwrap());

    let (url, request) = transport.last();
    assert!(url.ends_with("/sendDocument"));
    let part = request.attachment("document").expect("document part");
    assert_eq!(part.bytes, b"%PDF-1.4 fake report");
    assert_eq!(request.get("caption"), Some(&FormValue::from("")));
    assert_eq!(request.get("disable_notification"), Some(&FormValue::Bool(true)));
    assert_eq!(request.get("parse_mode"), Some(&FormValue::from("Markdown")));
}

#[test]
fn test_send_video_uses_video_method_and_own_thumbnail() {
    let transport = RecordingTransport::answering(r#"{"ok": true}"#);
    let bot = bot_with(transport.clone());

    let options = VideoOptions {
        file: FileOptions::with_caption("demo"),
        duration: Some(12),
        thumb: Some(InputFile::memory("thumb.jpg", b"THUMB".to_vec())),
        supports_streaming: Some(true),
        ..Default::default()
    };
    bot.send_video("1", &InputFile::memory("clip.mp4", b"VIDEO".to_vec()), &options)
        .unwrap();

    let (url, request) = transport.last();
    assert!(url.ends_with("/sendVideo"));
    assert_eq!(request.attachment("video").unwrap().bytes, b"VIDEO");
    assert_eq!(request.attachment("thumb").unwrap().bytes, b"THUMB");
    assert_eq!(request.attachment("thumb").unwrap().file_name, "thumb.jpg");
    assert!(request.attachment("photo").is_none());
    assert_eq!(request.get("duration"), Some(&FormValue::Int(12)));
    assert_eq!(request.get("supports_streaming"), Some(&FormValue::Bool(true)));
    assert_eq!(request.get("caption"), Some(&FormValue::from("demo")));
}

#[test]
fn test_video_fields_only_when_supplied() {
    let options = VideoOptions {
        width: Some(1920),
        ..Default::default()
    };
    let request = BotClient::build_file_request(
        MediaKind::Video,
        "1",
        &InputFile::memory("clip.mp4", vec![0]),
        &options.file,
        Some(&options),
    )
    .unwrap();

    assert_eq!(request.get("width"), Some(&FormValue::Int(1920)));
    for key in ["height", "duration", "supports_streaming"] {
        assert!(request.get(key).is_none(), "{} should be absent", key);
    }
    assert!(request.attachment("thumb").is_none());
    assert_eq!(request.attachments.len(), 1);
}

#[test]
fn test_missing_file_fails_before_network() {
    let transport = RecordingTransport::answering(r#"{"ok": true}"#);
    let bot = bot_with(transport.clone());

    let result = bot.send_photo(
        "1",
        &InputFile::path("/no/such/photo.jpg"),
        &FileOptions::default(),
    );
    assert!(matches!(result, Err(Error::File { .. })));
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn test_empty_token_fails_before_network() {
    init_logging();
    let transport = RecordingTransport::answering(r#"{"ok": true}"#);
    let bot = BotClient::with_transport(Configuration::new(""), transport.clone());

    let result = bot.send_message("1", "hi", &MessageOptions::default());
    assert!(matches!(result, Err(Error::Configuration(_))));
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn test_configuration() {
    let mut config = Configuration::new("123456:TEST_TOKEN");
    config.set_api_base("http://127.0.0.1:8081");
    config.set_timeout(Duration::from_secs(5));

    assert_eq!(config.bot_token(), "123456:TEST_TOKEN");
    assert_eq!(config.api_base(), "http://127.0.0.1:8081");
    assert_eq!(config.client_options().timeout, Duration::from_secs(5));
    assert!(config.validate().is_ok());

    let bot = BotClient::with_configuration(config);
    assert_eq!(bot.configuration().api_base(), "http://127.0.0.1:8081");
}

#[test]
fn test_concurrent_sends_share_client() {
    let transport = RecordingTransport::answering(r#"{"ok": true}"#);
    let bot = bot_with(transport.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let bot = bot.clone();
            std::thread::spawn(move || {
                bot.send_message(&i.to_string(), "hi", &MessageOptions::default())
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(transport.call_count(), 8);
}
