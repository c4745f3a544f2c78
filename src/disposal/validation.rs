//! Request validation for the certificate endpoint.
//!
//! The generator trusts its input; these checks run at the HTTP boundary.

use std::fmt;

use super::models::DisposalData;

/// Trait for validating request objects.
pub trait Validator {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} no puede estar vacío", label))
            .with_suggestion(format!("Capture {} antes de generar la constancia", label.to_lowercase()))
    }

    pub fn too_long(field: &str, label: &str, max: usize) -> Self {
        Self::new(field, format!("{} excede {} caracteres", label, max))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validación fallida: {} error(es)", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

pub fn validate_max_len(value: &str, field: &str, label: &str, max: usize, errors: &mut ValidationErrors) {
    if value.chars().count() > max {
        errors.add(ValidationError::too_long(field, label, max));
    }
}

pub const MAX_REASON_CHARS: usize = 4000;

impl Validator for DisposalData {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_required(&self.asset.tag, "asset.tag", "Etiqueta del activo", &mut errors);
        validate_required(&self.reason, "reason", "Motivo de la baja", &mut errors);
        validate_max_len(&self.reason, "reason", "Motivo de la baja", MAX_REASON_CHARS, &mut errors);

        errors.into_result()
    }
}
