//! Finishing pass: stamps the footer on every page once the page count is
//! final.

use super::{
    Align, Block, BlockKind, Document, DrawOp, Rgb, TextStyle, CONTENT_WIDTH, FOOTER_TOP, MARGIN,
    PAGE_HEIGHT,
};

const COMPLIANCE_LINES: [&str; 2] = [
    "Documento generado electrónicamente por el sistema de mesa de ayuda; cualquier alteración lo invalida.",
    "La autenticidad se comprueba con el código QR del documento o con el código de verificación.",
];

pub fn stamp_footers(document: &mut Document, folio: &str) {
    let total = document.pages.len();
    let right = MARGIN + CONTENT_WIDTH;
    let muted = TextStyle::regular(6.5).colored(Rgb::MUTED);

    for (index, page) in document.pages.iter_mut().enumerate() {
        page.ops.push(DrawOp::Line {
            x1: MARGIN,
            y1: FOOTER_TOP,
            x2: right,
            y2: FOOTER_TOP,
            width: 0.5,
            color: Rgb::RULE,
        });

        for (i, line) in COMPLIANCE_LINES.iter().enumerate() {
            page.ops.push(DrawOp::Text {
                x: MARGIN,
                y: FOOTER_TOP + 12.0 + i as f32 * 9.0,
                text: (*line).to_string(),
                style: muted,
            });
        }

        page.ops.push(DrawOp::Text {
            x: right,
            y: FOOTER_TOP + 12.0,
            text: folio.to_string(),
            style: TextStyle::bold(7.0).aligned(Align::Right),
        });
        page.ops.push(DrawOp::Text {
            x: right,
            y: FOOTER_TOP + 21.0,
            text: format!("Página {} de {}", index + 1, total),
            style: muted.aligned(Align::Right),
        });

        page.blocks.push(Block {
            kind: BlockKind::Footer,
            top: FOOTER_TOP,
            height: PAGE_HEIGHT - FOOTER_TOP,
        });
    }
}
