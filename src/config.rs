//! Runtime configuration loaded from the environment (and `.env`).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::disposal::certificate::DEFAULT_ORGANIZATION;
use crate::disposal::{CertificateSettings, QrOptions};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:8080",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub certificates: CertificateSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            certificates: CertificateSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults;
    /// unparsable numbers are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let qr_defaults = QrOptions::default();

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.allowed_origins);

        let qr = QrOptions {
            size: parse_or(&lookup, "QR_MODULE_SIZE_PX", qr_defaults.size),
            margin: parse_or(&lookup, "QR_MARGIN_MODULES", qr_defaults.margin),
        };

        Self {
            host: non_empty(lookup("SERVER_HOST")).unwrap_or(defaults.host),
            port: parse_or(&lookup, "SERVER_PORT", defaults.port),
            allowed_origins,
            certificates: CertificateSettings {
                organization_name: non_empty(lookup("ORGANIZATION_NAME"))
                    .unwrap_or_else(|| DEFAULT_ORGANIZATION.to_string()),
                logo_path: non_empty(lookup("BRAND_LOGO_PATH")).map(PathBuf::from),
                qr,
            },
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup(key)) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("{} has invalid value '{}', using default {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.certificates.organization_name, DEFAULT_ORGANIZATION);
        assert!(config.certificates.logo_path.is_none());
        assert_eq!(config.certificates.qr, QrOptions::default());
    }

    #[test]
    fn test_values_read_from_lookup() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SERVER_PORT", "9090"),
            ("ORGANIZATION_NAME", "Soporte Corporativo"),
            ("BRAND_LOGO_PATH", "/srv/logo.png"),
            ("QR_MODULE_SIZE_PX", "400"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ]));
        assert_eq!(config.port, 9090);
        assert_eq!(config.certificates.organization_name, "Soporte Corporativo");
        assert_eq!(
            config.certificates.logo_path,
            Some(PathBuf::from("/srv/logo.png"))
        );
        assert_eq!(config.certificates.qr.size, 400);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SERVER_PORT", "not-a-port"),
            ("QR_MARGIN_MODULES", "-3"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.certificates.qr.margin, 1);
    }
}
