use helpdesk_assets_server::disposal::qr::{
    build_asset_qr_payload, build_document_qr_payload, parse_document_qr_payload, QrCodeEncoder,
    QrEncoder, QrOptions,
};

#[test]
fn test_document_payload_round_trip_with_generic_parser() {
    let payload = build_document_qr_payload(
        "BAJA-20250101-000000000",
        "LAP-007",
        "2025-01-01",
        "ZIII-LAP0-0007-ABC-XYZ1",
    );

    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["type"], "disposal");
    assert_eq!(value["folio"], "BAJA-20250101-000000000");
    assert_eq!(value["assetTag"], "LAP-007");
    assert_eq!(value["date"], "2025-01-01");
    assert_eq!(value["code"], "ZIII-LAP0-0007-ABC-XYZ1");
}

#[test]
fn test_document_payload_preserves_unusual_characters() {
    let payload = build_document_qr_payload("F-1", "Tag \"quoted\" ñ", "15/01/2025", "C");
    let parsed = parse_document_qr_payload(&payload).unwrap();
    assert_eq!(parsed.asset_tag, "Tag \"quoted\" ñ");
    assert_eq!(parsed.date, "15/01/2025");
}

#[test]
fn test_asset_payload_is_stable() {
    assert_eq!(build_asset_qr_payload("a1b2"), build_asset_qr_payload("a1b2"));
    assert_ne!(build_asset_qr_payload("a1b2"), build_asset_qr_payload("a1b3"));
}

#[test]
fn test_realistic_document_payload_encodes() {
    let payload = build_document_qr_payload(
        "BAJA-20250115-103045123",
        "LAP-007",
        "2025-01-15",
        "ZIII-LAP0-8877-M5XYZ123-AB12",
    );
    let image = QrCodeEncoder.encode(&payload, &QrOptions::default()).unwrap();
    assert_eq!(image.width, image.height);
    assert!(image.width <= QrOptions::default().size);
    assert!(image.pixels.iter().any(|p| *p == 0));
}
