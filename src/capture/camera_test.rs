use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::*;

#[tokio::test]
async fn test_snapshot() {
    let camera = Camera::default().with_command("printf 'frame' > \"$SNAPSHOT_FILE\"");

    let attachment = camera
        .snapshot(CancellationToken::new())
        .await
        .expect("failed to snapshot")
        .expect("snapshot must produce an attachment");

    assert_eq!(attachment.mime_type(), "image/jpeg");
    assert_eq!(STANDARD.decode(attachment.data()).unwrap(), b"frame");
}

#[tokio::test]
async fn test_snapshot_unconfigured() {
    let camera = Camera::default();
    let attachment = camera
        .snapshot(CancellationToken::new())
        .await
        .expect("unconfigured camera is a no-op");
    assert!(attachment.is_none());
}

#[tokio::test]
async fn test_snapshot_cancelled() {
    let camera = Camera::default().with_command("sleep 30");

    let token = CancellationToken::new();
    token.cancel();

    let attachment = camera
        .snapshot(token)
        .await
        .expect("cancellation is not an error");
    assert!(attachment.is_none());
}

#[tokio::test]
async fn test_snapshot_command_failure() {
    let camera = Camera::default().with_command("exit 5");
    assert!(camera.snapshot(CancellationToken::new()).await.is_err());
}
