//! PostgreSQL board store.

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use super::{BoardRecord, NewBoard, StoreError};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS boards (
    id BIGSERIAL PRIMARY KEY,
    width INTEGER NOT NULL,
    height INTEGER NOT NULL,
    generation INTEGER NOT NULL,
    final_state BOOLEAN NOT NULL,
    state BYTEA NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

/// Board records in a `boards` table
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and make sure the schema exists
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn insert(&self, board: NewBoard) -> Result<BoardRecord, StoreError> {
        let row = sqlx::query(
            "INSERT INTO boards (width, height, generation, final_state, state) VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, width, height, generation, final_state, state, created_at, updated_at",
        )
        .bind(board.width)
        .bind(board.height)
        .bind(board.generation)
        .bind(board.is_final)
        .bind(board.data)
        .fetch_one(&self.pool)
        .await?;

        Ok(record_from_row(&row)?)
    }

    pub async fn get(&self, id: i64) -> Result<Option<BoardRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT id, width, height, generation, final_state, state, created_at, updated_at \
             FROM boards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(record_from_row(&row)?)),
            None => Ok(None),
        }
    }
}

fn record_from_row(row: &PgRow) -> Result<BoardRecord, sqlx::Error> {
    Ok(BoardRecord {
        id: row.try_get("id")?,
        width: row.try_get("width")?,
        height: row.try_get("height")?,
        generation: row.try_get("generation")?,
        is_final: row.try_get("final_state")?,
        data: row.try_get("state")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
