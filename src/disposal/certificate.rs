//! Disposal certificate assembly.
//!
//! Mints the folio and verification code, encodes both QR symbols, lays out
//! the pages, stamps the footers and serializes the PDF.

use chrono::{DateTime, FixedOffset};
use log::{debug, info};
use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;

use super::identifiers::{Clock, GeneratedIdentifiers, SystemClock};
use super::layout::{self, LayoutInput};
use super::models::DisposalData;
use super::pdf::{render_pdf, PdfMetadata};
use super::qr::{
    build_asset_qr_payload, build_document_qr_payload, QrCodeEncoder, QrEncoder, QrOptions,
};
use super::raster::load_brand_image;
use super::{CertificateError, GeneratedCertificate};

pub const DEFAULT_ORGANIZATION: &str = "Mesa de Ayuda TI";
const PRODUCER: &str = concat!("helpdesk-assets-server ", env!("CARGO_PKG_VERSION"));

/// Static settings shared by every certificate.
#[derive(Debug, Clone)]
pub struct CertificateSettings {
    pub organization_name: String,
    pub logo_path: Option<PathBuf>,
    pub qr: QrOptions,
}

impl Default for CertificateSettings {
    fn default() -> Self {
        Self {
            organization_name: DEFAULT_ORGANIZATION.to_string(),
            logo_path: None,
            qr: QrOptions::default(),
        }
    }
}

/// Builds disposal certificates. Holds no per-call state, so one instance can
/// serve concurrent requests.
#[derive(Clone)]
pub struct CertificateGenerator {
    settings: CertificateSettings,
    clock: Arc<dyn Clock>,
    encoder: Arc<dyn QrEncoder>,
}

impl CertificateGenerator {
    pub fn new(settings: CertificateSettings) -> Self {
        Self {
            settings,
            clock: Arc::new(SystemClock),
            encoder: Arc::new(QrCodeEncoder),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn QrEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn settings(&self) -> &CertificateSettings {
        &self.settings
    }

    /// Generate with the configured clock and the thread RNG.
    pub fn generate(&self, data: &DisposalData) -> Result<GeneratedCertificate, CertificateError> {
        let now = self.clock.now();
        self.generate_at(data, now, &mut rand::thread_rng())
    }

    /// Generate for an explicit instant and random source.
    pub fn generate_at<R: Rng + ?Sized>(
        &self,
        data: &DisposalData,
        now: DateTime<FixedOffset>,
        rng: &mut R,
    ) -> Result<GeneratedCertificate, CertificateError> {
        let serial = data.asset.serial_number.as_deref().unwrap_or_default();
        let ids = GeneratedIdentifiers::mint(&data.asset.tag, serial, &now, rng);
        let generated_at = format_timestamp(&now);
        debug!("Minted folio {} for asset {}", ids.folio, data.asset.tag);

        let asset_qr = data
            .asset_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .map(|code| self.encoder.encode(&build_asset_qr_payload(code), &self.settings.qr));

        let document_payload = build_document_qr_payload(
            &ids.folio,
            &data.asset.tag,
            &data.request_date,
            &ids.verification_code,
        );
        let document_qr = self.encoder.encode(&document_payload, &self.settings.qr);

        let logo = self.settings.logo_path.as_deref().map(load_brand_image);

        let mut document = layout::compose(LayoutInput {
            data,
            ids: &ids,
            generated_at: &generated_at,
            organization: &self.settings.organization_name,
            logo,
            asset_qr,
            document_qr,
        });
        layout::stamp_footers(&mut document, &ids.folio);

        let metadata = PdfMetadata {
            title: format!("Constancia de solicitud de baja {}", ids.folio),
            subject: format!("Activo {} - {}", data.asset.tag, ids.verification_code),
            producer: PRODUCER.to_string(),
        };
        let pdf = render_pdf(&document, &metadata)?;

        info!(
            "Generated disposal certificate {} for asset {} ({} pages, {} bytes)",
            ids.folio,
            data.asset.tag,
            document.pages.len(),
            pdf.len()
        );

        Ok(GeneratedCertificate {
            filename: certificate_filename(&ids.folio, &data.asset.tag),
            pdf,
            page_count: document.pages.len(),
            folio: ids.folio,
            verification_code: ids.verification_code,
        })
    }
}

impl Default for CertificateGenerator {
    fn default() -> Self {
        Self::new(CertificateSettings::default())
    }
}

/// `{folio}-{tag}.pdf`, each non-alphanumeric tag character replaced by `-`.
pub fn certificate_filename(folio: &str, asset_tag: &str) -> String {
    let tag: String = asset_tag
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{folio}-{tag}.pdf")
}

/// `DD/MM/YYYY HH:MM:SS` in the offset of `now`.
pub fn format_timestamp(now: &DateTime<FixedOffset>) -> String {
    now.format("%d/%m/%Y %H:%M:%S").to_string()
}
