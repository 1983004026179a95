//! Request body checks that run before a model is touched.

use crate::error::ValidationError;
use crate::model::CamperPatch;
use serde_json::Value;

/// Fields a camper PATCH may carry. Everything else, `id` included, is refused.
pub const CAMPER_PATCHABLE: &[&str] = &["name", "age"];

pub struct RequestValidator;

impl RequestValidator {
    /// Turn a PATCH body into a typed patch. Only allow-listed keys are accepted and none may be null.
    pub fn camper_patch(body: Value) -> Result<CamperPatch, ValidationError> {
        let map = match body {
            Value::Object(m) => m,
            _ => return Err(ValidationError::Body("body must be a JSON object".into())),
        };
        let mut patch = CamperPatch::default();
        for (key, v) in map {
            if !CAMPER_PATCHABLE.contains(&key.as_str()) {
                return Err(ValidationError::UnknownField(key));
            }
            if v.is_null() {
                return Err(ValidationError::Null(key));
            }
            match key.as_str() {
                "name" => {
                    let s = v.as_str().ok_or(ValidationError::WrongType { field: "name" })?;
                    patch.name = Some(s.to_string());
                }
                "age" => {
                    let n = v.as_i64().ok_or(ValidationError::WrongType { field: "age" })?;
                    patch.age = Some(n);
                }
                _ => {}
            }
        }
        Ok(patch)
    }
}
