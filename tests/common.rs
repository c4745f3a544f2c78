#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone};
use helpdesk_assets_server::disposal::models::{
    AssetSnapshot, ChangeRecord, DisposalData, TicketRecord,
};
use helpdesk_assets_server::disposal::qr::{QrEncoder, QrError, QrOptions};
use helpdesk_assets_server::disposal::raster::RasterImage;

/// Fixed instant used across tests: 2025-01-15 10:30:45.123 at UTC-6.
pub fn fixed_instant() -> DateTime<FixedOffset> {
    FixedOffset::west_opt(6 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 1, 15, 10, 30, 45)
        .unwrap()
        + chrono::Duration::milliseconds(123)
}

pub fn sample_data() -> DisposalData {
    DisposalData {
        asset: AssetSnapshot {
            tag: "LAP-007".to_string(),
            asset_type: Some("Laptop".to_string()),
            brand: Some("Lenovo".to_string()),
            model: Some("ThinkPad T14".to_string()),
            serial_number: Some("SN998877".to_string()),
            location_name: Some("Oficina Central".to_string()),
            department: Some("Finanzas".to_string()),
            assigned_user_name: Some("María López".to_string()),
            status: Some("En reparación".to_string()),
            purchase_date: Some("2021-03-15".to_string()),
            warranty_date: None,
        },
        reason: "Equipo obsoleto; el costo de reparación supera el valor del activo.".to_string(),
        requester_name: "Juan Pérez".to_string(),
        request_date: "2025-01-15".to_string(),
        approver_name: None,
        approval_date: None,
        approval_notes: None,
        tickets: Vec::new(),
        changes: Vec::new(),
        asset_code: Some("a1b2c3d4".to_string()),
    }
}

pub fn tickets(count: usize) -> Vec<TicketRecord> {
    (1..=count)
        .map(|i| TicketRecord {
            number: format!("TK-{i:04}"),
            title: format!("Incidencia número {i}"),
            status: "Cerrado".to_string(),
            date: "2024-12-01".to_string(),
        })
        .collect()
}

pub fn changes(count: usize) -> Vec<ChangeRecord> {
    (1..=count)
        .map(|i| ChangeRecord {
            field_label: "Ubicación".to_string(),
            old_value: Some(format!("Piso {i}")),
            new_value: Some(format!("Piso {}", i + 1)),
            date: "2024-11-20".to_string(),
            actor: None,
        })
        .collect()
}

/// Encoder that always fails, to exercise graceful degradation.
pub struct FailingEncoder;

impl QrEncoder for FailingEncoder {
    fn encode(&self, _content: &str, _options: &QrOptions) -> Result<RasterImage, QrError> {
        Err(QrError::Encode("simulated failure".to_string()))
    }
}

/// Encoder that returns a tiny fixed bitmap.
pub struct StubEncoder;

impl QrEncoder for StubEncoder {
    fn encode(&self, _content: &str, _options: &QrOptions) -> Result<RasterImage, QrError> {
        Ok(RasterImage::gray(2, 2, vec![0, 255, 255, 0]))
    }
}
