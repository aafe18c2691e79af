//! Repository for the `fashion_designs` table.

use chrono::Utc;
use fashionsd_core::design::{DesignPatch, NewDesign};
use fashionsd_core::error::CoreError;
use fashionsd_core::types::DbId;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::design::Design;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, prompt, negative_prompt, width, height, file_path, created_at";

/// Provides CRUD and search operations for design records.
pub struct DesignRepo;

impl DesignRepo {
    /// Insert a new design, returning the created row.
    ///
    /// Assigns a fresh UUID v4 and the current time. The insert runs in its
    /// own transaction and is only visible once committed.
    pub async fn create(pool: &DbPool, input: &NewDesign) -> Result<Design, sqlx::Error> {
        let id = Uuid::new_v4();
        tracing::info!(%id, prompt = %input.prompt, "Creating design");

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO fashion_designs
                (id, prompt, negative_prompt, width, height, file_path, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {COLUMNS}"
        );
        let design = sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .bind(&input.prompt)
            .bind(&input.negative_prompt)
            .bind(input.width)
            .bind(input.height)
            .bind(&input.file_path)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(design)
    }

    /// List every design, most recently created first.
    pub async fn list(pool: &DbPool) -> Result<Vec<Design>, sqlx::Error> {
        tracing::debug!("Listing all designs");
        let query = format!("SELECT {COLUMNS} FROM fashion_designs ORDER BY created_at DESC");
        sqlx::query_as::<_, Design>(&query).fetch_all(pool).await
    }

    /// Find a design by its ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Design>, sqlx::Error> {
        tracing::debug!(%id, "Looking up design");
        let query = format!("SELECT {COLUMNS} FROM fashion_designs WHERE id = ?1");
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All designs whose prompt equals `prompt` exactly.
    pub async fn find_by_prompt(pool: &DbPool, prompt: &str) -> Result<Vec<Design>, sqlx::Error> {
        tracing::debug!(prompt, "Looking up designs by prompt");
        let query = format!("SELECT {COLUMNS} FROM fashion_designs WHERE prompt = ?1");
        sqlx::query_as::<_, Design>(&query)
            .bind(prompt)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over prompts.
    ///
    /// Wildcard characters in `term` match literally. An empty term is
    /// rejected rather than matching everything; whitespace is searched as is.
    pub async fn search(pool: &DbPool, term: &str) -> Result<Vec<Design>, StoreError> {
        if term.is_empty() {
            return Err(CoreError::Validation("Search prompt is required".to_string()).into());
        }
        tracing::debug!(term, "Searching designs");

        let query = format!(
            "SELECT {COLUMNS} FROM fashion_designs
             WHERE prompt LIKE ?1 ESCAPE '\\'
             ORDER BY created_at DESC"
        );
        let designs = sqlx::query_as::<_, Design>(&query)
            .bind(like_pattern(term))
            .fetch_all(pool)
            .await?;
        Ok(designs)
    }

    /// Update a design in place. Only non-`None` fields in `input` are applied;
    /// `id` and `created_at` are never modified.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &DesignPatch,
    ) -> Result<Option<Design>, sqlx::Error> {
        tracing::info!(%id, "Saving design");

        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE fashion_designs SET
                prompt = COALESCE(?2, prompt),
                negative_prompt = COALESCE(?3, negative_prompt),
                width = COALESCE(?4, width),
                height = COALESCE(?5, height),
                file_path = COALESCE(?6, file_path)
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        let design = sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .bind(&input.prompt)
            .bind(&input.negative_prompt)
            .bind(input.width)
            .bind(input.height)
            .bind(&input.file_path)
            .fetch_optional(&mut *tx)
            .await?;

        if design.is_some() {
            tx.commit().await?;
        }
        Ok(design)
    }

    /// Delete a design by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        tracing::info!(%id, "Deleting design");

        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM fashion_designs WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }
}

/// Build a `LIKE` pattern matching `term` anywhere, escaping `\`, `%` and `_`.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
