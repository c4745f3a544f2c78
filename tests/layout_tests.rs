mod common;

use helpdesk_assets_server::disposal::identifiers::GeneratedIdentifiers;
use helpdesk_assets_server::disposal::layout::{
    compose, reason_box_height, stamp_footers, BlockKind, Document, LayoutInput, FOOTER_TOP,
    REASON_MIN_HEIGHT,
};
use helpdesk_assets_server::disposal::models::DisposalData;
use helpdesk_assets_server::disposal::qr::QrError;
use helpdesk_assets_server::disposal::raster::RasterImage;

fn ids() -> GeneratedIdentifiers {
    GeneratedIdentifiers {
        folio: "BAJA-20250115-103045123".to_string(),
        verification_code: "ZIII-LAP0-8877-M5XYZ123-AB12".to_string(),
    }
}

fn qr() -> RasterImage {
    RasterImage::gray(2, 2, vec![0, 255, 255, 0])
}

fn layout(data: &DisposalData, asset_qr: Option<Result<RasterImage, QrError>>) -> Document {
    let ids = ids();
    let mut document = compose(LayoutInput {
        data,
        ids: &ids,
        generated_at: "15/01/2025 10:30:45",
        organization: "Mesa de Ayuda TI",
        logo: None,
        asset_qr,
        document_qr: Ok(qr()),
    });
    stamp_footers(&mut document, &ids.folio);
    document
}

#[test]
fn test_minimal_record_has_two_pages() {
    let document = layout(&common::sample_data(), Some(Ok(qr())));
    assert_eq!(document.pages.len(), 2);

    let first = &document.pages[0];
    assert!(first.has_block(BlockKind::Header));
    assert!(first.has_block(BlockKind::AssetInfo));
    assert!(first.has_block(BlockKind::Reason));
    assert!(first.has_block(BlockKind::RequestApproval));

    let second = &document.pages[1];
    assert!(second.has_block(BlockKind::Signatures));
    assert!(second.has_block(BlockKind::Verification));
    assert!(second.has_block(BlockKind::AssetQr));
    assert!(second.has_block(BlockKind::DocumentQr));
}

#[test]
fn test_empty_histories_are_omitted() {
    let document = layout(&common::sample_data(), Some(Ok(qr())));
    assert!(!document.has_block(BlockKind::TicketHistory));
    assert!(!document.has_block(BlockKind::ChangeHistory));
    assert!(!document.pages.iter().any(|p| p.contains_text("HISTORIAL")));
}

#[test]
fn test_histories_show_true_count_but_cap_rows() {
    let mut data = common::sample_data();
    data.tickets = common::tickets(14);
    let document = layout(&data, None);

    let page = document
        .pages
        .iter()
        .find(|p| p.has_block(BlockKind::TicketHistory))
        .unwrap();
    assert!(page.contains_text("HISTORIAL DE INCIDENCIAS (14)"));
    assert!(page.contains_text("TK-0010"));
    assert!(!page.contains_text("TK-0011"));
    assert!(page.contains_text("Se muestran 10 de 14 registros."));
    assert!(!document.has_block(BlockKind::ChangeHistory));
}

#[test]
fn test_change_history_independent_of_tickets() {
    let mut data = common::sample_data();
    data.changes = common::changes(3);
    let document = layout(&data, None);

    assert!(!document.has_block(BlockKind::TicketHistory));
    assert!(document.has_block(BlockKind::ChangeHistory));
    assert!(document.pages[0].contains_text("HISTORIAL DE CAMBIOS (3)"));
}

#[test]
fn test_missing_asset_code_leaves_slot_blank() {
    let with_qr = layout(&common::sample_data(), Some(Ok(qr())));
    let without_qr = layout(&common::sample_data(), None);

    let page = &without_qr.pages[1];
    assert!(!page.has_block(BlockKind::AssetQr));
    assert!(page.has_block(BlockKind::DocumentQr));
    assert!(!page.contains_text("QR del activo"));
    assert!(page.contains_text("QR del documento"));
    assert!(page.contains_text("ZIII-LAP0-8877-M5XYZ123-AB12"));
    assert!(page.contains_text("Folio: BAJA-20250115-103045123"));
    assert_eq!(page.image_count(), 1);

    // the rest of the panel keeps its position
    assert_eq!(
        with_qr.pages[1].block(BlockKind::Verification),
        page.block(BlockKind::Verification)
    );
    assert_eq!(
        with_qr.pages[1].block(BlockKind::DocumentQr),
        page.block(BlockKind::DocumentQr)
    );
}

#[test]
fn test_failed_qr_codes_do_not_abort_layout() {
    let ids = ids();
    let data = common::sample_data();
    let document = compose(LayoutInput {
        data: &data,
        ids: &ids,
        generated_at: "15/01/2025 10:30:45",
        organization: "Mesa de Ayuda TI",
        logo: None,
        asset_qr: Some(Err(QrError::Encode("boom".to_string()))),
        document_qr: Err(QrError::EmptyPayload),
    });

    assert_eq!(document.pages.len(), 2);
    assert_eq!(document.pages[1].image_count(), 0);
    assert!(document.pages[1].has_block(BlockKind::Verification));
    assert!(document.pages[1].contains_text("ZIII-LAP0-8877-M5XYZ123-AB12"));
}

#[test]
fn test_long_reason_grows_box() {
    let mut short = common::sample_data();
    short.reason = "Obsoleto".to_string();
    let mut long = common::sample_data();
    long.reason = "El equipo presenta fallas recurrentes en la tarjeta madre. ".repeat(12);

    let short_doc = layout(&short, None);
    let long_doc = layout(&long, None);

    let short_block = short_doc.pages[0].block(BlockKind::Reason).unwrap();
    let long_block = long_doc.pages[0].block(BlockKind::Reason).unwrap();
    assert!(long_block.height > short_block.height);
    assert!(reason_box_height(10) > REASON_MIN_HEIGHT);
    assert_eq!(reason_box_height(1), REASON_MIN_HEIGHT);
}

#[test]
fn test_absent_values_render_placeholder() {
    let document = layout(&common::sample_data(), None);
    let page = &document.pages[0];
    assert!(page.texts().any(|t| t == "—"));
    assert!(page.contains_text("Juan Pérez"));
}

#[test]
fn test_footer_on_every_page_with_total() {
    let mut data = common::sample_data();
    data.tickets = common::tickets(10);
    data.changes = common::changes(10);
    data.reason = "Motivo extenso. ".repeat(120);
    let document = layout(&data, None);
    let total = document.pages.len();
    assert!(total > 2);

    for (i, page) in document.pages.iter().enumerate() {
        assert!(page.has_block(BlockKind::Footer));
        assert_eq!(page.blocks.last().unwrap().kind, BlockKind::Footer);
        assert!(page.contains_text(&format!("Página {} de {}", i + 1, total)));
        assert!(page.contains_text("BAJA-20250115-103045123"));
    }

    // signatures still open a page of their own
    let signatures = document
        .pages
        .iter()
        .position(|p| p.has_block(BlockKind::Signatures))
        .unwrap();
    assert_eq!(signatures, total - 1);
    assert_eq!(document.pages[signatures].blocks[0].kind, BlockKind::Signatures);
}

#[test]
fn test_full_histories_fit_first_page() {
    let mut data = common::sample_data();
    data.tickets = common::tickets(25);
    data.changes = common::changes(12);
    let document = layout(&data, Some(Ok(qr())));

    assert_eq!(document.pages.len(), 2);
    assert!(document.pages[0].has_block(BlockKind::TicketHistory));
    assert!(document.pages[0].has_block(BlockKind::ChangeHistory));
    assert!(document.pages[0].contains_text("HISTORIAL DE INCIDENCIAS (25)"));
    assert!(document.pages[0].contains_text("HISTORIAL DE CAMBIOS (12)"));
}

#[test]
fn test_long_approval_notes_continue_on_next_page() {
    let mut data = common::sample_data();
    data.approval_notes = Some("Observacion larga de autorizacion. ".repeat(250));
    let document = layout(&data, Some(Ok(qr())));

    let request_pages = document
        .pages
        .iter()
        .filter(|page| page.has_block(BlockKind::RequestApproval))
        .count();
    assert!(request_pages > 1);

    for (index, page) in document.pages.iter().enumerate() {
        for block in page.blocks.iter().filter(|b| b.kind != BlockKind::Footer) {
            let bottom = block.top + block.height;
            assert!(
                bottom <= FOOTER_TOP,
                "page {} {:?} ends at {} past {}",
                index + 1,
                block.kind,
                bottom,
                FOOTER_TOP
            );
        }
    }

    let note_count: usize = document
        .pages
        .iter()
        .flat_map(|page| page.texts())
        .map(|text| text.matches("autorizacion.").count())
        .sum();
    assert_eq!(note_count, 250);

    let last = document.pages.last().unwrap();
    assert!(last.has_block(BlockKind::Signatures));
    assert!(!last.has_block(BlockKind::RequestApproval));
}
