use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::*;

#[tokio::test]
async fn test_read_attachment() {
    let path = std::env::temp_dir().join(format!("taxtutor-test-{}.png", uuid::Uuid::new_v4()));
    tokio::fs::write(&path, b"not really a png")
        .await
        .expect("failed to write test file");

    let attachment = read_attachment(path.to_str().unwrap())
        .await
        .expect("failed to read attachment");

    assert_eq!(attachment.mime_type(), "image/png");
    assert_eq!(
        STANDARD.decode(attachment.data()).unwrap(),
        b"not really a png"
    );

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_read_attachment_missing_file() {
    let path = std::env::temp_dir().join(format!("taxtutor-test-{}.jpg", uuid::Uuid::new_v4()));
    assert!(read_attachment(path.to_str().unwrap()).await.is_err());
}

#[test]
fn test_mime_from_path() {
    assert_eq!(mime_from_path("/tmp/question.PNG"), "image/png");
    assert_eq!(mime_from_path("/tmp/question.jpeg"), "image/jpeg");
    assert_eq!(mime_from_path("/tmp/question.webp"), "image/webp");
    assert_eq!(mime_from_path("/tmp/question"), "image/jpeg");
}
