use std::sync::Arc;

use mockito::Matcher;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::models::Attachment;

use super::*;

#[tokio::test]
async fn test_get_completion() {
    let body = std::fs::read_to_string("./testdata/gemini_response.json")
        .expect("Failed to read test data");

    let mut server = mockito::Server::new_async().await;
    let completion_handler = server
        .mock(
            "POST",
            "/models/gemini-2.0-flash:streamGenerateContent",
        )
        .with_status(200)
        .match_query(Matcher::AllOf(vec![Matcher::UrlEncoded(
            "key".into(),
            "test_token".into(),
        )]))
        .match_body(Matcher::PartialJson(serde_json::json!({
            "contents": [
                { "role": "model", "parts": [{ "text": "Hello CA Final Aspirant!" }] },
                { "role": "user", "parts": [{ "text": "What is Section 74A?" }] }
            ]
        })))
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let sender: ArcEventTx = Arc::new(tx);

    let backend = setup_backend(server.url());
    let prompt = TutorPrompt::new("What is Section 74A?")
        .with_history(vec![Turn::new_model("Hello CA Final Aspirant!")]);

    backend
        .get_completion(prompt, sender)
        .await
        .expect("Failed to get completion");
    completion_handler.assert();

    let events = collect_responses(&mut rx, time::Duration::from_secs(5), 4)
        .await
        .expect("Failed to collect events");
    assert_eq!(events.len(), 4);

    let text = events
        .iter()
        .map(|e| e.text.clone())
        .collect::<Vec<_>>()
        .join("");
    assert_eq!(text, "This is a test");

    let last = events.last().unwrap();
    assert_eq!(last.text, "");
    assert_eq!(last.done, true);

    // All fragments belong to the same response
    assert!(events.iter().all(|e| e.id == events[0].id));
}

#[tokio::test]
async fn test_get_completion_image_only() {
    let body = std::fs::read_to_string("./testdata/gemini_response.json")
        .expect("Failed to read test data");

    let mut server = mockito::Server::new_async().await;
    let completion_handler = server
        .mock(
            "POST",
            "/models/gemini-2.0-flash:streamGenerateContent",
        )
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        { "text": IMAGE_PROMPT },
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                    ]
                }
            ]
        })))
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let sender: ArcEventTx = Arc::new(tx);

    let backend = setup_backend(server.url());
    let prompt = TutorPrompt::new("").with_attachment(Attachment::new("image/png", "aGVsbG8="));

    backend
        .get_completion(prompt, sender)
        .await
        .expect("Failed to get completion");
    completion_handler.assert();

    let events = collect_responses(&mut rx, time::Duration::from_secs(5), 4)
        .await
        .expect("Failed to collect events");
    assert_eq!(events.last().unwrap().done, true);
}

#[tokio::test]
async fn test_get_completion_without_api_key() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let sender: ArcEventTx = Arc::new(tx);

    let backend = Gemini::default().with_model("gemini-2.0-flash");

    backend
        .get_completion(TutorPrompt::new("What is Section 74A?"), sender)
        .await
        .expect("Soft failure must not raise");

    let events = collect_responses(&mut rx, time::Duration::from_secs(5), 1)
        .await
        .expect("Failed to collect events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text, MISSING_KEY_MESSAGE);
    assert_eq!(events[0].done, true);
}

#[tokio::test]
async fn test_get_completion_service_error() {
    let mut server = mockito::Server::new_async().await;
    let completion_handler = server
        .mock(
            "POST",
            "/models/gemini-2.0-flash:streamGenerateContent",
        )
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body(r#"{"error": {"message": "quota exceeded", "code": 429, "status": "RESOURCE_EXHAUSTED"}}"#)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let sender: ArcEventTx = Arc::new(tx);

    let backend = setup_backend(server.url());

    let err = backend
        .get_completion(TutorPrompt::new("What is Section 74A?"), sender)
        .await
        .expect_err("Service error must raise");
    completion_handler.assert();

    assert!(err.to_string().contains("quota exceeded"));
    assert!(rx.try_recv().is_err(), "no fragments on a hard failure");
}

async fn collect_responses(
    rx: &mut UnboundedReceiver<Event>,
    timeout: time::Duration,
    want_len: usize,
) -> Result<Vec<CompletionDelta>> {
    let mut responses = Vec::new();
    let start = time::Instant::now();
    while responses.len() < want_len {
        if let Some(event) = rx.recv().await {
            match event {
                Event::ChatCompletionResponse(msg) => responses.push(msg),
                event => eyre::bail!("Unexpected event: {:?}", event),
            }
        }
        if start.elapsed() > timeout {
            return Err(eyre::eyre!("Timeout while waiting for events"));
        }
    }
    Ok(responses)
}

fn setup_backend(url: String) -> Gemini {
    Gemini::default()
        .with_endpoint(&url)
        .with_api_key("test_token")
        .with_model("gemini-2.0-flash")
}
