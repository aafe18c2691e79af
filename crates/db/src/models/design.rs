//! Design record model.
//!
//! A design is the metadata for one generated image. Serializing a
//! [`Design`] yields the API representation: every column, `id` as a
//! hyphenated UUID and `created_at` as an RFC 3339 string.

use fashionsd_core::design::NewDesign;
use fashionsd_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `fashion_designs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Design {
    pub id: DbId,
    pub prompt: String,
    pub negative_prompt: String,
    pub width: i32,
    pub height: i32,
    pub file_path: String,
    pub created_at: Timestamp,
}

impl Design {
    /// The caller-controlled fields, without `id` and `created_at`.
    pub fn fields(&self) -> NewDesign {
        NewDesign {
            prompt: self.prompt.clone(),
            negative_prompt: self.negative_prompt.clone(),
            width: self.width,
            height: self.height,
            file_path: self.file_path.clone(),
        }
    }
}
