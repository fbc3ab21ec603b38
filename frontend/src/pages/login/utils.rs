use crate::api::{ApiError, LoginRequest};
use serde_json::json;

/// Required-field checks only; the backend owns credential rules.
pub fn validate_credentials(email: &str, password: &str) -> Result<LoginRequest, ApiError> {
    let mut missing = Vec::new();
    if email.trim().is_empty() {
        missing.push("El correo es obligatorio");
    }
    if password.is_empty() {
        missing.push("La contraseña es obligatoria");
    }
    if !missing.is_empty() {
        let mut error = ApiError::validation("Completa los campos obligatorios");
        error.details = Some(json!({ "errors": missing }));
        return Err(error);
    }
    Ok(LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}
