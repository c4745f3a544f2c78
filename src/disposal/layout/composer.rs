//! Section-by-section composition of the certificate pages.
//!
//! Narrative content (header, asset, reason, request, histories) flows from
//! the top of page 1 and only spills onto another page when it runs out of
//! room. Signatures and the verification panel always start a fresh page.

use log::warn;

use super::{
    fit_text, wrap_text, Align, Block, BlockKind, Document, DrawOp, Page, Rgb, TextStyle,
    CONTENT_WIDTH, FOOTER_TOP, MARGIN,
};
use crate::disposal::identifiers::GeneratedIdentifiers;
use crate::disposal::models::{or_placeholder, DisposalData, PLACEHOLDER};
use crate::disposal::qr::QrError;
use crate::disposal::raster::{BrandImageError, RasterImage};

pub const HISTORY_ROW_LIMIT: usize = 10;

const CONTENT_BOTTOM: f32 = FOOTER_TOP - 12.0;
const HEADER_HEIGHT: f32 = 56.0;
const SECTION_GAP: f32 = 10.0;
const SECTION_TITLE_HEIGHT: f32 = 16.0;
const ROW_HEIGHT: f32 = 14.0;
const REQUEST_CELL_HEIGHT: f32 = 26.0;
const CELL_PAD: f32 = 5.0;

const REASON_FONT: f32 = 9.0;
const REASON_LINE_HEIGHT: f32 = 12.0;
const REASON_PAD: f32 = 8.0;
/// Smallest reason box, so a one-word reason still shows a visible frame.
pub const REASON_MIN_HEIGHT: f32 = 40.0;

const NOTE_FONT: f32 = 8.5;
const NOTE_LINE_HEIGHT: f32 = 11.0;
const NOTE_LABEL_HEIGHT: f32 = 12.0;
const NOTE_PAD: f32 = 4.0;

const SIGNATURE_GAP: f32 = 12.0;
const SIGNATURE_HEIGHT: f32 = 170.0;
const PANEL_HEIGHT: f32 = 200.0;
const QR_SLOT_WIDTH: f32 = 140.0;
const QR_EDGE: f32 = 110.0;

const SIGNATURE_ROLES: [(&str, &str); 3] = [
    (
        "Custodio del activo",
        "Persona que tiene el equipo bajo su resguardo y confirma su entrega.",
    ),
    (
        "Supervisor de área",
        "Valida que la baja está justificada para la operación del área.",
    ),
    (
        "Jefe de departamento",
        "Autoriza la baja definitiva del activo del inventario.",
    ),
];

const LEGAL_NOTICES: [&str; 2] = [
    "Esta constancia no constituye la baja definitiva hasta contar con todas las firmas.",
    "La información refleja el estado del activo al momento de la solicitud.",
];

/// Everything the layout step consumes. Optional visuals arrive as results so
/// a failed logo or QR can be skipped without unwinding.
pub struct LayoutInput<'a> {
    pub data: &'a DisposalData,
    pub ids: &'a GeneratedIdentifiers,
    /// Human-readable generation instant.
    pub generated_at: &'a str,
    pub organization: &'a str,
    pub logo: Option<Result<RasterImage, BrandImageError>>,
    /// `None` when the asset has no code.
    pub asset_qr: Option<Result<RasterImage, QrError>>,
    pub document_qr: Result<RasterImage, QrError>,
}

/// Height of an approval-notes box; only the first one carries the label.
fn notes_box_height(line_count: usize, labelled: bool) -> f32 {
    let lead = if labelled { NOTE_LABEL_HEIGHT } else { NOTE_PAD };
    lead + line_count as f32 * NOTE_LINE_HEIGHT + NOTE_PAD
}

/// Height of the reason box for `line_count` wrapped lines.
pub fn reason_box_height(line_count: usize) -> f32 {
    (line_count as f32 * REASON_LINE_HEIGHT + 2.0 * REASON_PAD).max(REASON_MIN_HEIGHT)
}

/// Lay out every page except the footers.
pub fn compose(input: LayoutInput<'_>) -> Document {
    let LayoutInput {
        data,
        ids,
        generated_at,
        organization,
        logo,
        asset_qr,
        document_qr,
    } = input;

    let mut composer = Composer::new();

    composer.header(organization, ids, generated_at, logo);
    composer.asset_info(data);
    composer.reason(&data.reason);
    composer.request_approval(data);
    if !data.tickets.is_empty() {
        composer.ticket_history(data);
    }
    if !data.changes.is_empty() {
        composer.change_history(data);
    }

    composer.new_page();
    composer.signatures();
    composer.verification(ids, generated_at, asset_qr, document_qr);

    composer.finish()
}

struct Composer {
    pages: Vec<Page>,
    images: Vec<RasterImage>,
    y: f32,
}

impl Composer {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            images: Vec::new(),
            y: MARGIN,
        }
    }

    fn finish(self) -> Document {
        Document {
            pages: self.pages,
            images: self.images,
        }
    }

    fn page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = MARGIN;
    }

    /// Break to a new page unless `height` fits below the cursor.
    fn ensure_space(&mut self, height: f32) {
        if self.y + height > CONTENT_BOTTOM && self.y > MARGIN {
            self.new_page();
        }
    }

    fn mark(&mut self, kind: BlockKind, top: f32, height: f32) {
        self.page().blocks.push(Block { kind, top, height });
    }

    fn text(&mut self, x: f32, y: f32, text: impl Into<String>, style: TextStyle) {
        self.page().ops.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            style,
        });
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Option<Rgb>, stroke: Option<Rgb>) {
        self.page().ops.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            fill,
            stroke,
        });
    }

    fn rule(&mut self, x1: f32, y: f32, x2: f32, color: Rgb) {
        self.page().ops.push(DrawOp::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            width: 0.6,
            color,
        });
    }

    fn image(&mut self, x: f32, y: f32, w: f32, h: f32, image: RasterImage) {
        self.images.push(image);
        let index = self.images.len() - 1;
        self.page().ops.push(DrawOp::Image { x, y, w, h, image: index });
    }

    fn section_title(&mut self, title: &str) {
        let y = self.y;
        self.text(MARGIN, y + 11.0, title, TextStyle::bold(10.0).colored(Rgb::BRAND));
        self.rule(MARGIN, y + SECTION_TITLE_HEIGHT - 2.0, MARGIN + CONTENT_WIDTH, Rgb::BRAND);
        self.y += SECTION_TITLE_HEIGHT;
    }

    fn header(
        &mut self,
        organization: &str,
        ids: &GeneratedIdentifiers,
        generated_at: &str,
        logo: Option<Result<RasterImage, BrandImageError>>,
    ) {
        let top = self.y;
        self.rect(MARGIN, top, CONTENT_WIDTH, HEADER_HEIGHT, Some(Rgb::BRAND), None);

        let mut text_x = MARGIN + 12.0;
        match logo {
            Some(Ok(image)) if image.width > 0 && image.height > 0 => {
                let h = HEADER_HEIGHT - 16.0;
                let w = (h * image.width as f32 / image.height as f32).min(120.0);
                self.image(MARGIN + 8.0, top + 8.0, w, h, image);
                text_x += w + 8.0;
            }
            Some(Ok(_)) => warn!("Brand image has zero size, header rendered without logo"),
            Some(Err(e)) => warn!("Brand image skipped: {}", e),
            None => {}
        }

        let white = |style: TextStyle| style.colored(Rgb::WHITE);
        self.text(text_x, top + 16.0, organization, white(TextStyle::regular(9.0)));
        self.text(
            text_x,
            top + 33.0,
            "CONSTANCIA DE SOLICITUD DE BAJA",
            white(TextStyle::bold(14.0)),
        );
        self.text(
            text_x,
            top + 46.0,
            "Activo de tecnologías de la información",
            white(TextStyle::regular(8.5)),
        );

        let right = MARGIN + CONTENT_WIDTH - 12.0;
        self.text(
            right,
            top + 22.0,
            format!("Folio: {}", ids.folio),
            white(TextStyle::bold(9.0)).aligned(Align::Right),
        );
        self.text(
            right,
            top + 35.0,
            format!("Generado: {generated_at}"),
            white(TextStyle::regular(8.0)).aligned(Align::Right),
        );

        self.mark(BlockKind::Header, top, HEADER_HEIGHT);
        self.y = top + HEADER_HEIGHT + SECTION_GAP;
    }

    fn asset_info(&mut self, data: &DisposalData) {
        let asset = &data.asset;
        let rows: [[(&str, &str); 2]; 6] = [
            [
                ("Etiqueta", asset.tag.as_str()),
                ("Ubicación", or_placeholder(asset.location_name.as_deref())),
            ],
            [
                ("Tipo", or_placeholder(asset.asset_type.as_deref())),
                ("Departamento", or_placeholder(asset.department.as_deref())),
            ],
            [
                ("Marca", or_placeholder(asset.brand.as_deref())),
                ("Usuario asignado", or_placeholder(asset.assigned_user_name.as_deref())),
            ],
            [
                ("Modelo", or_placeholder(asset.model.as_deref())),
                ("Estado", or_placeholder(asset.status.as_deref())),
            ],
            [
                ("Número de serie", or_placeholder(asset.serial_number.as_deref())),
                ("Fecha de compra", or_placeholder(asset.purchase_date.as_deref())),
            ],
            [
                ("Vence garantía", or_placeholder(asset.warranty_date.as_deref())),
                ("", ""),
            ],
        ];

        let height = SECTION_TITLE_HEIGHT + rows.len() as f32 * ROW_HEIGHT;
        self.ensure_space(height);
        let top = self.y;
        self.section_title("INFORMACIÓN DEL ACTIVO");

        let half = CONTENT_WIDTH / 2.0;
        let label_w = 95.0;
        for row in rows {
            let y = self.y;
            for (col, (label, value)) in row.into_iter().enumerate() {
                let x = MARGIN + col as f32 * half;
                self.rect(x, y, label_w, ROW_HEIGHT, Some(Rgb::SHADE), Some(Rgb::RULE));
                self.rect(x + label_w, y, half - label_w, ROW_HEIGHT, None, Some(Rgb::RULE));
                if label.is_empty() {
                    continue;
                }
                self.text(x + CELL_PAD, y + 10.0, label, TextStyle::bold(8.0));
                let value = fit_text(value, half - label_w - 2.0 * CELL_PAD, 8.5, false);
                self.text(x + label_w + CELL_PAD, y + 10.0, value, TextStyle::regular(8.5));
            }
            self.y += ROW_HEIGHT;
        }

        self.mark(BlockKind::AssetInfo, top, height);
        self.y += SECTION_GAP;
    }

    fn reason(&mut self, reason: &str) {
        let inner = CONTENT_WIDTH - 2.0 * REASON_PAD;
        let lines = wrap_text(reason, inner, REASON_FONT, false);
        let max_per_box = ((CONTENT_BOTTOM - MARGIN - SECTION_TITLE_HEIGHT - 2.0 * REASON_PAD)
            / REASON_LINE_HEIGHT)
            .floor() as usize;

        let mut titled = false;
        for chunk in lines.chunks(max_per_box.max(1)) {
            let box_h = reason_box_height(chunk.len());
            let title_h = if titled { 0.0 } else { SECTION_TITLE_HEIGHT };
            self.ensure_space(title_h + box_h);

            let top = self.y;
            if !titled {
                self.section_title("MOTIVO DE LA BAJA");
                titled = true;
            }

            let box_top = self.y;
            self.rect(MARGIN, box_top, CONTENT_WIDTH, box_h, None, Some(Rgb::RULE));
            for (i, line) in chunk.iter().enumerate() {
                let baseline = box_top + REASON_PAD + 9.0 + i as f32 * REASON_LINE_HEIGHT;
                self.text(MARGIN + REASON_PAD, baseline, line.clone(), TextStyle::regular(REASON_FONT));
            }

            self.y = box_top + box_h;
            self.mark(BlockKind::Reason, top, self.y - top);
        }
        self.y += SECTION_GAP;
    }

    fn request_approval(&mut self, data: &DisposalData) {
        let cells = [
            ("Solicitado por", or_placeholder(Some(data.requester_name.as_str()))),
            ("Fecha de solicitud", or_placeholder(Some(data.request_date.as_str()))),
            ("Autorizado por", or_placeholder(data.approver_name.as_deref())),
            ("Fecha de autorización", or_placeholder(data.approval_date.as_deref())),
        ];
        let notes = or_placeholder(data.approval_notes.as_deref());
        let note_lines = wrap_text(notes, CONTENT_WIDTH - 2.0 * CELL_PAD, NOTE_FONT, false);

        let cells_h = SECTION_TITLE_HEIGHT + 2.0 * REQUEST_CELL_HEIGHT;
        let full_h = cells_h + notes_box_height(note_lines.len(), true);
        if full_h <= CONTENT_BOTTOM - MARGIN {
            self.ensure_space(full_h);
        } else {
            self.ensure_space(cells_h + notes_box_height(1, true));
        }

        let top = self.y;
        self.section_title("SOLICITUD Y AUTORIZACIÓN");

        let half = CONTENT_WIDTH / 2.0;
        for (i, (label, value)) in cells.into_iter().enumerate() {
            let x = MARGIN + (i % 2) as f32 * half;
            let y = self.y + (i / 2) as f32 * REQUEST_CELL_HEIGHT;
            self.rect(x, y, half, REQUEST_CELL_HEIGHT, None, Some(Rgb::RULE));
            self.text(x + CELL_PAD, y + 9.0, label, TextStyle::bold(7.5).colored(Rgb::MUTED));
            let value = fit_text(value, half - 2.0 * CELL_PAD, 9.0, false);
            self.text(x + CELL_PAD, y + 20.0, value, TextStyle::regular(9.0));
        }
        self.y += 2.0 * REQUEST_CELL_HEIGHT;

        // Notes continue on following pages when they outgrow the current one.
        let mut remaining = note_lines.as_slice();
        let mut block_top = top;
        let mut labelled = true;
        loop {
            let room = CONTENT_BOTTOM - self.y - notes_box_height(0, labelled);
            let fit = ((room / NOTE_LINE_HEIGHT).floor() as usize).max(1);
            let (chunk, rest) = remaining.split_at(fit.min(remaining.len()));

            self.notes_box(chunk, labelled);
            self.mark(BlockKind::RequestApproval, block_top, self.y - block_top);

            remaining = rest;
            if remaining.is_empty() {
                break;
            }
            self.new_page();
            block_top = self.y;
            labelled = false;
        }

        self.y += SECTION_GAP;
    }

    fn notes_box(&mut self, lines: &[String], labelled: bool) {
        let y = self.y;
        let height = notes_box_height(lines.len(), labelled);
        self.rect(MARGIN, y, CONTENT_WIDTH, height, None, Some(Rgb::RULE));

        let lead = if labelled {
            self.text(
                MARGIN + CELL_PAD,
                y + 9.0,
                "Observaciones de autorización",
                TextStyle::bold(7.5).colored(Rgb::MUTED),
            );
            NOTE_LABEL_HEIGHT
        } else {
            NOTE_PAD
        };
        for (i, line) in lines.iter().enumerate() {
            let baseline = y + lead + 8.0 + i as f32 * NOTE_LINE_HEIGHT;
            self.text(MARGIN + CELL_PAD, baseline, line.clone(), TextStyle::regular(NOTE_FONT));
        }
        self.y = y + height;
    }

    fn ticket_history(&mut self, data: &DisposalData) {
        let rows: Vec<Vec<String>> = data
            .tickets
            .iter()
            .take(HISTORY_ROW_LIMIT)
            .map(|t| {
                vec![
                    t.number.clone(),
                    t.title.clone(),
                    t.status.clone(),
                    t.date.clone(),
                ]
            })
            .collect();

        self.history_table(
            BlockKind::TicketHistory,
            &format!("HISTORIAL DE INCIDENCIAS ({})", data.tickets.len()),
            &[("Folio", 70.0), ("Título", 0.0), ("Estado", 80.0), ("Fecha", 80.0)],
            rows,
            data.tickets.len(),
        );
    }

    fn change_history(&mut self, data: &DisposalData) {
        let rows: Vec<Vec<String>> = data
            .changes
            .iter()
            .take(HISTORY_ROW_LIMIT)
            .map(|c| {
                vec![
                    c.field_label.clone(),
                    or_placeholder(c.old_value.as_deref()).to_string(),
                    or_placeholder(c.new_value.as_deref()).to_string(),
                    c.date.clone(),
                    or_placeholder(c.actor.as_deref()).to_string(),
                ]
            })
            .collect();

        self.history_table(
            BlockKind::ChangeHistory,
            &format!("HISTORIAL DE CAMBIOS ({})", data.changes.len()),
            &[
                ("Campo", 85.0),
                ("Valor anterior", 0.0),
                ("Valor nuevo", 0.0),
                ("Fecha", 70.0),
                ("Realizado por", 90.0),
            ],
            rows,
            data.changes.len(),
        );
    }

    /// Table with a shaded header row. Columns declared with width `0.0`
    /// share whatever width the fixed columns leave.
    fn history_table(
        &mut self,
        kind: BlockKind,
        title: &str,
        columns: &[(&str, f32)],
        rows: Vec<Vec<String>>,
        total: usize,
    ) {
        let fixed: f32 = columns.iter().map(|(_, w)| w).sum();
        let flexible = columns.iter().filter(|(_, w)| *w == 0.0).count().max(1);
        let flex_w = (CONTENT_WIDTH - fixed) / flexible as f32;
        let widths: Vec<f32> = columns
            .iter()
            .map(|(_, w)| if *w == 0.0 { flex_w } else { *w })
            .collect();

        let truncated = total > rows.len();
        let note_h = if truncated { 12.0 } else { 0.0 };
        let height = SECTION_TITLE_HEIGHT + ROW_HEIGHT * (rows.len() + 1) as f32 + note_h;
        self.ensure_space(height);
        let top = self.y;
        self.section_title(title);

        let mut x = MARGIN;
        let y = self.y;
        for ((label, _), w) in columns.iter().zip(&widths) {
            self.rect(x, y, *w, ROW_HEIGHT, Some(Rgb::SHADE), Some(Rgb::RULE));
            self.text(x + CELL_PAD, y + 10.0, *label, TextStyle::bold(8.0));
            x += w;
        }
        self.y += ROW_HEIGHT;

        for row in rows {
            let mut x = MARGIN;
            let y = self.y;
            for (cell, w) in row.iter().zip(&widths) {
                self.rect(x, y, *w, ROW_HEIGHT, None, Some(Rgb::RULE));
                let value = if cell.trim().is_empty() { PLACEHOLDER } else { cell.as_str() };
                let value = fit_text(value, w - 2.0 * CELL_PAD, 8.0, false);
                self.text(x + CELL_PAD, y + 10.0, value, TextStyle::regular(8.0));
                x += w;
            }
            self.y += ROW_HEIGHT;
        }

        if truncated {
            self.text(
                MARGIN,
                self.y + 9.0,
                format!("Se muestran {HISTORY_ROW_LIMIT} de {total} registros."),
                TextStyle::regular(7.0).colored(Rgb::MUTED),
            );
            self.y += note_h;
        }

        self.mark(kind, top, height);
        self.y += SECTION_GAP;
    }

    fn signatures(&mut self) {
        let top = self.y;
        self.section_title("FIRMAS DE CONFORMIDAD");

        let box_w = (CONTENT_WIDTH - 2.0 * SIGNATURE_GAP) / 3.0;
        let y = self.y + 4.0;
        for (i, (role, description)) in SIGNATURE_ROLES.iter().enumerate() {
            let x = MARGIN + i as f32 * (box_w + SIGNATURE_GAP);
            self.rect(x, y, box_w, SIGNATURE_HEIGHT, None, Some(Rgb::RULE));

            self.rect(x + 8.0, y + 8.0, 16.0, 16.0, Some(Rgb::BRAND), None);
            self.text(
                x + 16.0,
                y + 19.5,
                (i + 1).to_string(),
                TextStyle::bold(9.0).colored(Rgb::WHITE).aligned(Align::Center),
            );
            self.text(x + 30.0, y + 20.0, *role, TextStyle::bold(9.0));

            let desc_lines = wrap_text(description, box_w - 16.0, 7.0, false);
            for (j, line) in desc_lines.into_iter().enumerate() {
                self.text(
                    x + 8.0,
                    y + 38.0 + j as f32 * 9.0,
                    line,
                    TextStyle::regular(7.0).colored(Rgb::MUTED),
                );
            }

            for (j, label) in ["Nombre", "Fecha", "Hora"].into_iter().enumerate() {
                let line_y = y + 95.0 + j as f32 * 24.0;
                self.rule(x + 8.0, line_y, x + box_w - 8.0, Rgb::BLACK);
                self.text(x + 8.0, line_y + 8.0, label, TextStyle::regular(6.5).colored(Rgb::MUTED));
            }
        }

        self.y = y + SIGNATURE_HEIGHT;
        self.mark(BlockKind::Signatures, top, self.y - top);
        self.y += SECTION_GAP + 6.0;
    }

    fn verification(
        &mut self,
        ids: &GeneratedIdentifiers,
        generated_at: &str,
        asset_qr: Option<Result<RasterImage, QrError>>,
        document_qr: Result<RasterImage, QrError>,
    ) {
        let height = SECTION_TITLE_HEIGHT + PANEL_HEIGHT;
        self.ensure_space(height);
        let top = self.y;
        self.section_title("VERIFICACIÓN DEL DOCUMENTO");

        let y = self.y + 4.0;
        self.rect(MARGIN, y, CONTENT_WIDTH, PANEL_HEIGHT, Some(Rgb::SHADE), Some(Rgb::RULE));

        let left_x = MARGIN;
        let right_x = MARGIN + CONTENT_WIDTH - QR_SLOT_WIDTH;
        let center_x = MARGIN + QR_SLOT_WIDTH;
        let center_w = CONTENT_WIDTH - 2.0 * QR_SLOT_WIDTH;

        match asset_qr {
            Some(Ok(image)) => {
                self.qr_slot(left_x, y, image, "QR del activo", "Identifica el equipo físico");
                self.mark(BlockKind::AssetQr, y, PANEL_HEIGHT);
            }
            Some(Err(e)) => warn!("Asset QR skipped: {}", e),
            None => {}
        }

        match document_qr {
            Ok(image) => {
                self.qr_slot(right_x, y, image, "QR del documento", "Valida esta constancia");
                self.mark(BlockKind::DocumentQr, y, PANEL_HEIGHT);
            }
            Err(e) => warn!("Document QR skipped: {}", e),
        }

        let mid = center_x + center_w / 2.0;
        let centered = |style: TextStyle| style.aligned(Align::Center);
        let mut line_y = y + 22.0;
        self.text(
            mid,
            line_y,
            "Código de verificación",
            centered(TextStyle::bold(8.0).colored(Rgb::MUTED)),
        );
        line_y += 16.0;
        for line in wrap_text(&ids.verification_code, center_w - 16.0, 11.0, true) {
            self.text(mid, line_y, line, centered(TextStyle::bold(11.0).colored(Rgb::BRAND)));
            line_y += 14.0;
        }
        line_y += 6.0;
        self.text(mid, line_y, format!("Folio: {}", ids.folio), centered(TextStyle::bold(8.5)));
        line_y += 12.0;
        self.text(
            mid,
            line_y,
            format!("Generado: {generated_at}"),
            centered(TextStyle::regular(8.0)),
        );
        line_y += 18.0;
        for notice in LEGAL_NOTICES {
            for line in wrap_text(notice, center_w - 16.0, 6.5, false) {
                self.text(mid, line_y, line, centered(TextStyle::regular(6.5).colored(Rgb::MUTED)));
                line_y += 8.5;
            }
            line_y += 3.0;
        }

        self.y = y + PANEL_HEIGHT;
        self.mark(BlockKind::Verification, top, self.y - top);
        self.y += SECTION_GAP;
    }

    fn qr_slot(&mut self, slot_x: f32, top: f32, image: RasterImage, caption: &str, hint: &str) {
        let x = slot_x + (QR_SLOT_WIDTH - QR_EDGE) / 2.0;
        let y = top + 20.0;
        self.image(x, y, QR_EDGE, QR_EDGE, image);

        let mid = slot_x + QR_SLOT_WIDTH / 2.0;
        self.text(mid, y + QR_EDGE + 16.0, caption, TextStyle::bold(8.0).aligned(Align::Center));
        self.text(
            mid,
            y + QR_EDGE + 27.0,
            hint,
            TextStyle::regular(6.5).colored(Rgb::MUTED).aligned(Align::Center),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disposal::layout::{text_width, PAGE_WIDTH};

    #[test]
    fn test_reason_box_height_floor() {
        assert_eq!(reason_box_height(0), REASON_MIN_HEIGHT);
        assert_eq!(reason_box_height(1), REASON_MIN_HEIGHT);
        assert!(reason_box_height(10) > reason_box_height(1));
    }

    #[test]
    fn test_reason_box_height_grows_per_line() {
        let diff = reason_box_height(11) - reason_box_height(10);
        assert!((diff - REASON_LINE_HEIGHT).abs() < f32::EPSILON);
    }

    #[test]
    fn test_notes_box_height_matches_label() {
        assert_eq!(notes_box_height(1, true), 27.0);
        assert_eq!(notes_box_height(1, false), 19.0);
        assert_eq!(notes_box_height(3, true) - notes_box_height(1, true), 2.0 * NOTE_LINE_HEIGHT);
    }

    #[test]
    fn test_signature_boxes_fit_content_width() {
        let box_w = (CONTENT_WIDTH - 2.0 * SIGNATURE_GAP) / 3.0;
        assert!(MARGIN + 3.0 * box_w + 2.0 * SIGNATURE_GAP <= PAGE_WIDTH - MARGIN + 0.01);
    }

    #[test]
    fn test_second_page_fits_above_footer() {
        let bottom = MARGIN
            + SECTION_TITLE_HEIGHT
            + 4.0
            + SIGNATURE_HEIGHT
            + SECTION_GAP
            + 6.0
            + SECTION_TITLE_HEIGHT
            + 4.0
            + PANEL_HEIGHT;
        assert!(bottom <= CONTENT_BOTTOM);
    }

    #[test]
    fn test_text_width_of_roles_fits_boxes() {
        let box_w = (CONTENT_WIDTH - 2.0 * SIGNATURE_GAP) / 3.0;
        for (role, _) in SIGNATURE_ROLES {
            assert!(30.0 + text_width(role, 9.0, true) < box_w);
        }
    }
}
