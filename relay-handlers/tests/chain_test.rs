//! End-to-end through the handler chain: LoggingHandler → CommandHandler → RelayHandler with a
//! recording bot and scripted AI services.

mod common;

use common::{dispatcher, message, MockImages, MockLlm, RecordingBot, Scripted, Sent, FAKE_PNG};
use handler_chain::HandlerChain;
use relay_core::{
    Bot, HandlerResponse, ANSWER_REFUSED_MESSAGE, POLICY_REJECTION_MESSAGE,
    SERVICE_FAILURE_MESSAGE,
};
use relay_handlers::{
    command_keyboard, CommandHandler, LoggingHandler, RelayHandler, ASK_PICTURE_TEXT,
    ASK_QUESTION_TEXT, MAINTENANCE_NOTICE,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

struct Fixture {
    chain: HandlerChain,
    bot: Arc<RecordingBot>,
    llm: Arc<MockLlm>,
    images: Arc<MockImages>,
}

fn fixture_with(
    llm: MockLlm,
    images: MockImages,
    bot: RecordingBot,
    image_dir: &Path,
    debug: bool,
) -> Fixture {
    let llm = Arc::new(llm);
    let images = Arc::new(images);
    let bot = Arc::new(bot);
    let (store, dispatcher) = dispatcher(llm.clone(), images.clone(), image_dir);
    let core_bot: Arc<dyn Bot> = bot.clone();
    let username = Arc::new(RwLock::new(Some("relay_bot".to_string())));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(CommandHandler::new(
            store,
            core_bot.clone(),
            username,
            debug,
        )))
        .add_handler(Arc::new(RelayHandler::new(Arc::new(dispatcher), core_bot)));

    Fixture {
        chain,
        bot,
        llm,
        images,
    }
}

fn fixture(llm: MockLlm, images: MockImages, image_dir: &Path) -> Fixture {
    fixture_with(llm, images, RecordingBot::default(), image_dir, false)
}

/// **Test: a plain message is answered with the completion text, without keyboard.**
#[tokio::test]
async fn test_text_message_is_relayed() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture(
        MockLlm::new([Scripted::Ok("hi".into())]),
        MockImages::succeeding(),
        tmp.path(),
    );

    let response = f.chain.handle(&message(42, "hello")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply("hi".to_string()));
    assert_eq!(
        f.bot.sent(),
        vec![Sent::Text {
            chat_id: 42,
            text: "hi".to_string(),
            keyboard: None
        }]
    );
}

/// **Test: /start greets by first name, shows the keyboard and calls no AI service.**
#[tokio::test]
async fn test_start_greets_user() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture(MockLlm::default(), MockImages::succeeding(), tmp.path());

    f.chain.handle(&message(1, "/start")).await.unwrap();

    assert_eq!(
        f.bot.sent(),
        vec![Sent::Text {
            chat_id: 1,
            text: "Thank you for turning me on, Ann!".to_string(),
            keyboard: Some(command_keyboard())
        }]
    );
    assert!(f.llm.calls().is_empty());
}

/// **Test: in debug mode /start answers with the maintenance notice.**
#[tokio::test]
async fn test_start_in_debug_mode_shows_maintenance_notice() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture_with(
        MockLlm::default(),
        MockImages::succeeding(),
        RecordingBot::default(),
        tmp.path(),
        true,
    );

    f.chain.handle(&message(1, "/start")).await.unwrap();

    assert_eq!(f.bot.texts(), vec![MAINTENANCE_NOTICE.to_string()]);
}

/// **Test: /ask_picture then a prompt sends a photo; the next message goes back to text.**
#[tokio::test]
async fn test_ask_picture_flow() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture(
        MockLlm::new([Scripted::Ok("foxes are canids".into())]),
        MockImages::succeeding(),
        tmp.path(),
    );

    f.chain.handle(&message(7, "/ask_picture")).await.unwrap();
    f.chain.handle(&message(7, "a red fox")).await.unwrap();
    f.chain.handle(&message(7, "what is a fox?")).await.unwrap();

    let sent = f.bot.sent();
    assert_eq!(sent.len(), 3);
    assert!(matches!(&sent[0], Sent::Text { text, .. } if text == ASK_PICTURE_TEXT));
    assert_eq!(
        sent[1],
        Sent::Photo {
            chat_id: 7,
            bytes: FAKE_PNG.to_vec()
        }
    );
    assert!(matches!(&sent[2], Sent::Text { text, .. } if text == "foxes are canids"));
    assert_eq!(f.images.prompts(), vec!["a red fox".to_string()]);
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
}

/// **Test: /ask_question cancels a pending picture request.**
#[tokio::test]
async fn test_ask_question_cancels_picture_mode() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture(
        MockLlm::new([Scripted::Ok("sure".into())]),
        MockImages::succeeding(),
        tmp.path(),
    );

    f.chain.handle(&message(7, "/ask_picture")).await.unwrap();
    f.chain.handle(&message(7, "/ask_question")).await.unwrap();
    f.chain.handle(&message(7, "a red fox")).await.unwrap();

    assert_eq!(
        f.bot.texts(),
        vec![
            ASK_PICTURE_TEXT.to_string(),
            ASK_QUESTION_TEXT.to_string(),
            "sure".to_string()
        ]
    );
    assert!(f.images.prompts().is_empty());
}

/// **Test: a refused image prompt is answered with the fixed apology.**
#[tokio::test]
async fn test_policy_rejection_sends_apology() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture(
        MockLlm::default(),
        MockImages::with_outcome(Scripted::Policy),
        tmp.path(),
    );

    f.chain.handle(&message(7, "/ask_picture")).await.unwrap();
    let response = f.chain.handle(&message(7, "forbidden")).await.unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply(POLICY_REJECTION_MESSAGE.to_string())
    );
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

/// **Test: a refused text answer gets the neutral refusal, not the drawing apology.**
#[tokio::test]
async fn test_refused_answer_sends_neutral_apology() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture(
        MockLlm::new([Scripted::Refused]),
        MockImages::succeeding(),
        tmp.path(),
    );

    let response = f.chain.handle(&message(42, "something forbidden")).await.unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply(ANSWER_REFUSED_MESSAGE.to_string())
    );
    assert_ne!(ANSWER_REFUSED_MESSAGE, POLICY_REJECTION_MESSAGE);
    assert_eq!(f.bot.texts(), vec![ANSWER_REFUSED_MESSAGE.to_string()]);
}

/// **Test: a completion failure is answered with the fallback text, not an error.**
#[tokio::test]
async fn test_service_failure_sends_fallback() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture(
        MockLlm::new([Scripted::ServiceDown]),
        MockImages::succeeding(),
        tmp.path(),
    );

    let response = f.chain.handle(&message(42, "hello")).await.unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply(SERVICE_FAILURE_MESSAGE.to_string())
    );
}

/// **Test: delivery failures are swallowed and the history keeps the exchange.**
#[tokio::test]
async fn test_delivery_failure_does_not_fail_chain() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture_with(
        MockLlm::new([Scripted::Ok("hi".into()), Scripted::Ok("again".into())]),
        MockImages::succeeding(),
        RecordingBot::failing(),
        tmp.path(),
        false,
    );

    let response = f.chain.handle(&message(42, "hello")).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);

    f.chain.handle(&message(42, "still there?")).await.unwrap();
    let second_request = &f.llm.calls()[1];
    assert_eq!(second_request.len(), 3);
}

/// **Test: messages without text are not relayed.**
#[tokio::test]
async fn test_empty_message_is_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture(MockLlm::default(), MockImages::succeeding(), tmp.path());

    let response = f.chain.handle(&message(42, "   ")).await.unwrap();

    assert_eq!(response, HandlerResponse::Continue);
    assert!(f.bot.sent().is_empty());
    assert!(f.llm.calls().is_empty());
}

/// **Test: a command addressed to another bot is not treated as ours.**
#[tokio::test]
async fn test_foreign_command_is_not_handled_as_command() {
    let tmp = tempfile::tempdir().unwrap();
    let f = fixture(
        MockLlm::new([Scripted::Ok("hm".into())]),
        MockImages::succeeding(),
        tmp.path(),
    );

    f.chain
        .handle(&message(3, "/ask_picture@other_bot"))
        .await
        .unwrap();
    f.chain.handle(&message(3, "/start@relay_bot")).await.unwrap();

    let texts = f.bot.texts();
    assert_eq!(texts[0], "hm");
    assert_eq!(texts[1], "Thank you for turning me on, Ann!");
    assert!(f.images.prompts().is_empty());
}
