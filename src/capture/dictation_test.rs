use super::*;

#[tokio::test]
async fn test_transcribe() {
    let dictation = Dictation::default()
        .with_command("echo \"what is blocked credit under section 17(5)?\"")
        .with_locale("en-IN");

    let transcript = dictation.transcribe().await;
    assert_eq!(
        transcript.as_deref(),
        Some("what is blocked credit under section 17(5)?")
    );
}

#[tokio::test]
async fn test_transcribe_passes_locale() {
    let dictation = Dictation::default()
        .with_command("printf '%s' \"$DICTATION_LOCALE\"")
        .with_locale("en-IN");

    assert_eq!(dictation.transcribe().await.as_deref(), Some("en-IN"));
}

#[tokio::test]
async fn test_transcribe_swallows_failures() {
    let dictation = Dictation::default().with_command("exit 3");
    assert_eq!(dictation.transcribe().await, None);

    let dictation = Dictation::default().with_command("true");
    assert_eq!(dictation.transcribe().await, None, "empty stdout is no transcript");

    let dictation = Dictation::default();
    assert_eq!(dictation.transcribe().await, None, "unconfigured adapter is a no-op");
}
