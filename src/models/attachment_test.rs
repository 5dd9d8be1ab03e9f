use super::*;

#[test]
fn test_from_data_uri() {
    let att = Attachment::from_data_uri("data:image/png;base64,aGVsbG8=")
        .expect("failed to parse data URI");
    assert_eq!(att.mime_type(), "image/png");
    assert_eq!(att.data(), "aGVsbG8=");
}

#[test]
fn test_from_data_uri_without_mime_type() {
    let att = Attachment::from_data_uri("data:;base64,aGVsbG8=").expect("failed to parse data URI");
    assert_eq!(att.mime_type(), "image/jpeg");
    assert_eq!(att.data(), "aGVsbG8=");
}

#[test]
fn test_from_data_uri_rejects_plain_text() {
    assert!(Attachment::from_data_uri("hello world").is_err());
    assert!(Attachment::from_data_uri("").is_err());
}

#[test]
fn test_to_data_uri_round_trip() {
    let att = Attachment::new("image/webp", "Zm9vYmFy");
    let parsed = Attachment::from_data_uri(&att.to_data_uri()).unwrap();
    assert_eq!(parsed, att);
}
