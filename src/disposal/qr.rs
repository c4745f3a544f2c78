//! QR payloads and symbol encoding.
//!
//! Two symbols go on every certificate: one identifying the physical asset
//! and one identifying the certificate itself. Payloads are JSON so any
//! generic scanner can parse them.

use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use super::raster::RasterImage;

pub const DOCUMENT_PAYLOAD_TYPE: &str = "disposal";
pub const ASSET_PAYLOAD_TYPE: &str = "asset";

#[derive(Debug, Error)]
pub enum QrError {
    #[error("QR payload is empty")]
    EmptyPayload,
    #[error("failed to encode QR symbol: {0}")]
    Encode(String),
}

/// Payload of the asset QR: resolves to the asset record by its code.
pub fn build_asset_qr_payload(asset_code: &str) -> String {
    json!({
        "type": ASSET_PAYLOAD_TYPE,
        "code": asset_code,
    })
    .to_string()
}

/// Decoded content of the document QR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQrPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub folio: String,
    pub asset_tag: String,
    pub date: String,
    pub code: String,
}

/// Payload of the document QR.
pub fn build_document_qr_payload(
    folio: &str,
    asset_tag: &str,
    request_date: &str,
    verification_code: &str,
) -> String {
    json!({
        "type": DOCUMENT_PAYLOAD_TYPE,
        "folio": folio,
        "assetTag": asset_tag,
        "date": request_date,
        "code": verification_code,
    })
    .to_string()
}

/// Parse a scanned document QR back into its fields.
pub fn parse_document_qr_payload(content: &str) -> Result<DocumentQrPayload, serde_json::Error> {
    serde_json::from_str(content)
}

/// Error correction level for every symbol.
pub const ERROR_CORRECTION: EcLevel = EcLevel::H;

/// Rendering options for one QR bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    /// Target edge length in pixels; the result is the nearest whole-module fit.
    pub size: u32,
    /// Quiet zone in modules.
    pub margin: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: 300,
            margin: 1,
        }
    }
}

/// Bitmap-encoding capability.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, content: &str, options: &QrOptions) -> Result<RasterImage, QrError>;
}

/// Encoder backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl QrEncoder for QrCodeEncoder {
    fn encode(&self, content: &str, options: &QrOptions) -> Result<RasterImage, QrError> {
        if content.is_empty() {
            return Err(QrError::EmptyPayload);
        }

        let code = QrCode::with_error_correction_level(content.as_bytes(), ERROR_CORRECTION)
            .map_err(|e| QrError::Encode(e.to_string()))?;

        let modules = code.width();
        let colors = code.to_colors();
        let margin = options.margin as usize;
        let total = modules + 2 * margin;
        let scale = (options.size as usize / total).max(1);
        let edge = total * scale;

        let mut pixels = vec![255u8; edge * edge];
        for (index, color) in colors.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let mx = index % modules + margin;
            let my = index / modules + margin;
            for y in my * scale..(my + 1) * scale {
                let row = y * edge;
                pixels[row + mx * scale..row + (mx + 1) * scale].fill(0);
            }
        }

        Ok(RasterImage::gray(edge as u32, edge as u32, pixels))
    }
}
