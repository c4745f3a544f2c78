use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};

use super::models::DisposalData;
use super::validation::Validator;
use crate::{AppState, ErrorResponse};

pub const FOLIO_HEADER: &str = "X-Certificate-Folio";
pub const VERIFICATION_CODE_HEADER: &str = "X-Verification-Code";

#[utoipa::path(
    context_path = "/api",
    tag = "Disposal Certificates",
    post,
    path = "/disposal/certificate",
    request_body = DisposalData,
    responses(
        (status = 200, description = "Disposal certificate PDF, with folio and verification code in the response headers", content_type = "application/pdf"),
        (status = 400, description = "Missing asset tag or reason", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn generate_certificate(
    state: web::Data<AppState>,
    body: web::Json<DisposalData>,
) -> impl Responder {
    let data = body.into_inner();
    info!("Executing generate_certificate handler for asset {}", data.asset.tag);

    if let Err(errors) = data.validate() {
        warn!("Rejected disposal certificate request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&errors.to_string()));
    }

    let generator = state.certificates.clone();
    match web::block(move || generator.generate(&data)).await {
        Ok(Ok(certificate)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", certificate.filename),
            ))
            .insert_header((FOLIO_HEADER, certificate.folio))
            .insert_header((VERIFICATION_CODE_HEADER, certificate.verification_code))
            .body(certificate.pdf),
        Ok(Err(e)) => {
            error!("Failed to generate disposal certificate: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to generate certificate"))
        }
        Err(e) => {
            error!("Certificate generation task failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to generate certificate"))
        }
    }
}

/// Configure disposal certificate routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/disposal/certificate").route(web::post().to(generate_certificate)),
    );
}
