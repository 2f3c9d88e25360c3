use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::{ValidationErrors, ValidationErrorsKind};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Bare confirmation body for deletes and sign-out
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SuccessDto {
    pub success: bool,
}

/// Field-level detail for a rejected admin-facing write request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDetailDto {
    /// Machine-readable error code, e.g. `VALIDATION_ERROR`
    pub code: String,
    /// Human-readable summary
    pub message: String,
    /// Per-field validation messages
    pub details: HashMap<String, String>,
}

/// Structured error envelope returned by admin-facing endpoints
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ValidationErrorDto {
    pub success: bool,
    pub error: ErrorDetailDto,
    /// ISO-8601 timestamp of the failure
    pub timestamp: String,
}

impl ValidationErrorDto {
    /// Flattens validator output into a per-field message map, using dotted
    /// paths for nested structs.
    pub fn from_errors(errors: &ValidationErrors) -> Self {
        let mut details = HashMap::new();
        flatten_errors("", errors, &mut details);

        Self {
            success: false,
            error: ErrorDetailDto {
                code: "VALIDATION_ERROR".to_string(),
                message: "Validation failed".to_string(),
                details,
            },
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn flatten_errors(prefix: &str, errors: &ValidationErrors, out: &mut HashMap<String, String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(error) = field_errors.first() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());

                    out.insert(path, message);
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten_errors(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}
