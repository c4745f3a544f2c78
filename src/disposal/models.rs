use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Placeholder printed wherever a value is absent.
pub const PLACEHOLDER: &str = "—";

/// Returns the value, or the placeholder when it is missing or blank.
pub fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER,
    }
}

/// Snapshot of the asset at the moment the disposal was requested.
#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshot {
    #[schema(example = "LAP-007")]
    pub tag: String,
    #[schema(example = "Laptop")]
    pub asset_type: Option<String>,
    #[schema(example = "Lenovo")]
    pub brand: Option<String>,
    #[schema(example = "ThinkPad T14")]
    pub model: Option<String>,
    #[schema(example = "SN998877")]
    pub serial_number: Option<String>,
    #[schema(example = "Oficina Central")]
    pub location_name: Option<String>,
    #[schema(example = "Finanzas")]
    pub department: Option<String>,
    #[schema(example = "María López")]
    pub assigned_user_name: Option<String>,
    #[schema(example = "En reparación")]
    pub status: Option<String>,
    #[schema(example = "2021-03-15")]
    pub purchase_date: Option<String>,
    #[schema(example = "2024-03-15")]
    pub warranty_date: Option<String>,
}

/// Incident linked to the asset.
#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
pub struct TicketRecord {
    #[schema(example = "TK-1042")]
    pub number: String,
    #[schema(example = "Pantalla no enciende")]
    pub title: String,
    #[schema(example = "Cerrado")]
    pub status: String,
    #[schema(example = "2025-01-10")]
    pub date: String,
}

/// One field change recorded in the asset audit log.
#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    #[schema(example = "Ubicación")]
    pub field_label: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    #[schema(example = "2025-01-12")]
    pub date: String,
    #[schema(example = "Soporte TI")]
    pub actor: Option<String>,
}

/// Everything needed to print a disposal certificate.
///
/// `reason` and `asset.tag` must be non-empty; the generator does not check.
#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisposalData {
    pub asset: AssetSnapshot,
    #[schema(example = "Equipo obsoleto, reparación supera el valor del activo")]
    pub reason: String,
    #[schema(example = "Juan Pérez")]
    pub requester_name: String,
    #[schema(example = "2025-01-15")]
    pub request_date: String,
    pub approver_name: Option<String>,
    pub approval_date: Option<String>,
    pub approval_notes: Option<String>,
    #[serde(default)]
    pub tickets: Vec<TicketRecord>,
    #[serde(default)]
    pub changes: Vec<ChangeRecord>,
    /// Opaque asset identifier; when absent the asset QR is left out.
    pub asset_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder(None), PLACEHOLDER);
        assert_eq!(or_placeholder(Some("   ")), PLACEHOLDER);
        assert_eq!(or_placeholder(Some("Dell")), "Dell");
    }

    #[test]
    fn test_disposal_data_deserialization() {
        let json = r#"{
            "asset": {
                "tag": "LAP-007",
                "assetType": "Laptop",
                "serialNumber": "SN998877"
            },
            "reason": "Equipo obsoleto",
            "requesterName": "Juan Pérez",
            "requestDate": "2025-01-15",
            "approverName": null,
            "assetCode": "a1b2c3"
        }"#;

        let data: DisposalData = serde_json::from_str(json).unwrap();
        assert_eq!(data.asset.tag, "LAP-007");
        assert_eq!(data.asset.serial_number.as_deref(), Some("SN998877"));
        assert!(data.asset.brand.is_none());
        assert!(data.tickets.is_empty());
        assert!(data.changes.is_empty());
        assert_eq!(data.asset_code.as_deref(), Some("a1b2c3"));
    }
}
