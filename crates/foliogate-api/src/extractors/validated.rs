//! `ValidatedJson` extractor — deserializes a JSON body then runs the
//! `validator` rules declared on the DTO.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use foliogate_core::error::AppError;

use crate::error::ApiError;

/// JSON body that has passed its declared validation rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

        value
            .validate()
            .map_err(|e| field_errors(&e))
            .map_err(ApiError::from)?;

        Ok(Self(value))
    }
}

/// Flattens `ValidationErrors` into a field→message map, keeping the
/// first message per field.
fn field_errors(errors: &ValidationErrors) -> AppError {
    let mut fields = BTreeMap::new();

    for (field, errs) in errors.field_errors() {
        let message = errs
            .iter()
            .filter_map(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .next()
            .unwrap_or_else(|| "Invalid value".to_string());
        fields.insert(field.to_string(), message);
    }

    AppError::validation_fields("Validation failed", fields)
}
