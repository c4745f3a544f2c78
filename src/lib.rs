use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod disposal;

use crate::config::AppConfig;
use crate::disposal::CertificateGenerator;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

/// Shared handler state.
pub struct AppState {
    pub certificates: CertificateGenerator,
}

impl AppState {
    pub fn new(certificates: CertificateGenerator) -> Self {
        Self { certificates }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(CertificateGenerator::new(config.certificates.clone()))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(crate::disposal::handlers::generate_certificate),
    components(schemas(
        disposal::models::DisposalData,
        disposal::models::AssetSnapshot,
        disposal::models::TicketRecord,
        disposal::models::ChangeRecord,
        ErrorResponse,
    )),
    tags(
        (name = "Disposal Certificates", description = "Asset disposal certificate generation.")
    )
)]
pub struct ApiDoc;

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    let app_state = web::Data::new(AppState::from_config(&config));

    let prometheus = PrometheusMetricsBuilder::new("helpdesk_assets_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create Prometheus metrics middleware: {}", e))?;

    match &config.certificates.logo_path {
        Some(path) => log::info!("Certificate brand logo: {}", path.display()),
        None => log::info!("No BRAND_LOGO_PATH set, certificates render without logo"),
    }
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![
                "content-disposition",
                disposal::handlers::FOLIO_HEADER,
                disposal::handlers::VERIFICATION_CODE_HEADER,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(web::scope("/api").configure(disposal::handlers::config))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
