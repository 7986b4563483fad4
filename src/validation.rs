// src/validation.rs
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{AppError, FieldError};

/// Run derive-based validation and turn failures into field-level 400 details.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errs| {
        let mut details = Vec::new();
        flatten_into(&mut details, "", &errs);
        details.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::InvalidPayload(details)
    })
}

// Walks nested ValidationErrors into flat "items[0].quantity" style paths.
fn flatten_into(out: &mut Vec<FieldError>, prefix: &str, errors: &ValidationErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {path}"));
                    out.push(FieldError { field: path.clone(), message });
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten_into(out, &path, inner),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten_into(out, &format!("{path}[{index}]"), inner);
                }
            }
        }
    }
}
