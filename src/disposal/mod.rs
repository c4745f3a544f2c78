//! Asset-disposal certificates.
//!
//! Turns a disposal request and its supporting history into a two-page,
//! verifiable PDF:
//! - `identifiers` - folio and verification code
//! - `qr` - QR payloads and bitmap encoding
//! - `layout` - page composition and footer pass
//! - `pdf` - PDF serialization
//! - `certificate` - orchestration

pub mod certificate;
pub mod handlers;
pub mod identifiers;
pub mod layout;
pub mod models;
pub mod pdf;
pub mod qr;
pub mod raster;
pub mod validation;

pub use certificate::{CertificateGenerator, CertificateSettings};
pub use identifiers::{Clock, FixedClock, GeneratedIdentifiers, SystemClock};
pub use models::{AssetSnapshot, ChangeRecord, DisposalData, TicketRecord};
pub use qr::{QrCodeEncoder, QrEncoder, QrOptions};
pub use validation::Validator;

use thiserror::Error;

/// Errors that abort certificate generation. Optional visuals never end up
/// here; they are logged and left out of the document.
#[derive(Debug, Error)]
pub enum CertificateError {
    #[error(transparent)]
    Pdf(#[from] pdf::PdfError),
}

/// Result of a successful certificate generation.
#[derive(Debug)]
pub struct GeneratedCertificate {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub folio: String,
    pub verification_code: String,
    pub page_count: usize,
}
