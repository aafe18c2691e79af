//! Field validation for design records.
//!
//! Request bodies arrive as untyped JSON. [`deserialize`] is the strict
//! record mapping: every field must be present and well-typed. [`deserialize_patch`]
//! is the lenient variant used for partial updates, where absent fields are
//! left untouched. Both share the same integer coercion rules for the
//! dimension fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_PROMPT: &str = "prompt";
pub const FIELD_NEGATIVE_PROMPT: &str = "negative_prompt";
pub const FIELD_WIDTH: &str = "width";
pub const FIELD_HEIGHT: &str = "height";
pub const FIELD_FILE_PATH: &str = "file_path";

/// Default image width when a create request omits it.
pub const DEFAULT_WIDTH: i32 = 512;
/// Default image height when a create request omits it.
pub const DEFAULT_HEIGHT: i32 = 512;

// ---------------------------------------------------------------------------
// Validated shapes
// ---------------------------------------------------------------------------

/// The caller-controlled fields of a design record.
///
/// `id` and `created_at` are assigned by the store and never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDesign {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: i32,
    pub height: i32,
    pub file_path: String,
}

/// A partial update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignPatch {
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub file_path: Option<String>,
}

impl DesignPatch {
    pub fn is_empty(&self) -> bool {
        self.prompt.is_none()
            && self.negative_prompt.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.file_path.is_none()
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Validate a JSON mapping into a [`NewDesign`].
///
/// Fields are checked in record order so the first problem reported is
/// stable: `prompt`, `negative_prompt`, `width`, `height`, `file_path`.
pub fn deserialize(data: &Value) -> Result<NewDesign, CoreError> {
    let map = as_mapping(data)?;

    let prompt = required_text(map, FIELD_PROMPT)?;
    validate_prompt(&prompt)?;
    let negative_prompt = required_text(map, FIELD_NEGATIVE_PROMPT)?;
    let width = coerce_dimension(FIELD_WIDTH, required(map, FIELD_WIDTH)?)?;
    let height = coerce_dimension(FIELD_HEIGHT, required(map, FIELD_HEIGHT)?)?;
    let file_path = required_text(map, FIELD_FILE_PATH)?;

    Ok(NewDesign {
        prompt,
        negative_prompt,
        width,
        height,
        file_path,
    })
}

/// Validate a JSON mapping into a [`DesignPatch`].
///
/// Unknown keys (including `id` and `created_at`) are ignored. An explicit
/// `null` is treated like an absent key.
pub fn deserialize_patch(data: &Value) -> Result<DesignPatch, CoreError> {
    let map = as_mapping(data)?;

    let prompt = optional_text(map, FIELD_PROMPT)?;
    if let Some(prompt) = &prompt {
        validate_prompt(prompt)?;
    }

    Ok(DesignPatch {
        prompt,
        negative_prompt: optional_text(map, FIELD_NEGATIVE_PROMPT)?,
        width: present(map, FIELD_WIDTH)
            .map(|v| coerce_dimension(FIELD_WIDTH, v))
            .transpose()?,
        height: present(map, FIELD_HEIGHT)
            .map(|v| coerce_dimension(FIELD_HEIGHT, v))
            .transpose()?,
        file_path: optional_text(map, FIELD_FILE_PATH)?,
    })
}

/// Reject prompts that are empty or whitespace only.
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        return Err(invalid("prompt must not be empty"));
    }
    Ok(())
}

/// Coerce a JSON value into a positive `i32`.
///
/// Accepts integers, floats with no fractional part, and decimal strings.
/// Anything else (booleans, null, `"abc"`, `12.5`) is a type error naming
/// `field`.
pub fn coerce_dimension(field: &str, value: &Value) -> Result<i32, CoreError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    let n = parsed
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| {
            CoreError::Validation(format!("Invalid type for integer field: {field}"))
        })?;

    if n <= 0 {
        return Err(invalid(&format!("{field} must be a positive integer")));
    }
    Ok(n)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid(detail: &str) -> CoreError {
    CoreError::Validation(format!("Invalid design: {detail}"))
}

fn as_mapping(data: &Value) -> Result<&Map<String, Value>, CoreError> {
    data.as_object()
        .ok_or_else(|| invalid("body of request contained bad or no data"))
}

fn required<'a>(map: &'a Map<String, Value>, field: &str) -> Result<&'a Value, CoreError> {
    map.get(field)
        .ok_or_else(|| invalid(&format!("missing {field}")))
}

fn present<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    map.get(field).filter(|v| !v.is_null())
}

fn required_text(map: &Map<String, Value>, field: &str) -> Result<String, CoreError> {
    as_text(field, required(map, field)?)
}

fn optional_text(map: &Map<String, Value>, field: &str) -> Result<Option<String>, CoreError> {
    present(map, field).map(|v| as_text(field, v)).transpose()
}

fn as_text(field: &str, value: &Value) -> Result<String, CoreError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| invalid(&format!("{field} must be a string")))
}
