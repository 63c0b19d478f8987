//! PostgreSQL document backend
//!
//! Every collection lives in the single `documents` table; bodies are JSONB
//! and filters are evaluated with the containment operator (`@>`).

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::{DocStoreError, DocStoreResult, Document, Filter};

type Row = (Uuid, Value);

fn into_document((id, body): Row) -> Document<Value> {
    Document { id, body }
}

pub(super) async fn insert(pool: &PgPool, collection: &str, id: Uuid, body: Value) -> DocStoreResult<()> {
    sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
        .bind(collection)
        .bind(id)
        .bind(body)
        .execute(pool)
        .await
        .map_err(|e| DocStoreError::from_sqlx(collection, e))?;

    Ok(())
}

pub(super) async fn find_by_id(
    pool: &PgPool,
    collection: &str,
    id: Uuid,
) -> DocStoreResult<Option<Document<Value>>> {
    let row = sqlx::query_as::<_, Row>(
        "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
    )
    .bind(collection)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| DocStoreError::from_sqlx(collection, e))?;

    Ok(row.map(into_document))
}

pub(super) async fn find_one(
    pool: &PgPool,
    collection: &str,
    filter: &Filter,
) -> DocStoreResult<Option<Document<Value>>> {
    let row = sqlx::query_as::<_, Row>(
        r#"
        SELECT id, body FROM documents
        WHERE collection = $1 AND body @> $2
        ORDER BY created_at ASC
        LIMIT 1
        "#,
    )
    .bind(collection)
    .bind(filter.to_value())
    .fetch_optional(pool)
    .await
    .map_err(|e| DocStoreError::from_sqlx(collection, e))?;

    Ok(row.map(into_document))
}

pub(super) async fn find(
    pool: &PgPool,
    collection: &str,
    filter: &Filter,
) -> DocStoreResult<Vec<Document<Value>>> {
    let rows = sqlx::query_as::<_, Row>(
        r#"
        SELECT id, body FROM documents
        WHERE collection = $1 AND body @> $2
        ORDER BY created_at DESC
        "#,
    )
    .bind(collection)
    .bind(filter.to_value())
    .fetch_all(pool)
    .await
    .map_err(|e| DocStoreError::from_sqlx(collection, e))?;

    Ok(rows.into_iter().map(into_document).collect())
}

pub(super) async fn update(pool: &PgPool, collection: &str, id: Uuid, patch: Value) -> DocStoreResult<bool> {
    let result = sqlx::query(
        "UPDATE documents SET body = body || $3 WHERE collection = $1 AND id = $2",
    )
    .bind(collection)
    .bind(id)
    .bind(patch)
    .execute(pool)
    .await
    .map_err(|e| DocStoreError::from_sqlx(collection, e))?;

    Ok(result.rows_affected() > 0)
}

pub(super) async fn delete(pool: &PgPool, collection: &str, id: Uuid) -> DocStoreResult<bool> {
    let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
        .bind(collection)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| DocStoreError::from_sqlx(collection, e))?;

    Ok(result.rows_affected() > 0)
}
