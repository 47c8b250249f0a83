//! Postgres-backed repositories.
//!
//! Referential integrity is enforced by foreign keys. A write pointing at a
//! missing area/attraction surfaces as `InvalidReference`; deleting an area
//! or attraction cascades to the rows that reference it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use kennywood_core::{AreaId, AttractionId, CustomerId, Entity, ItineraryId};
use kennywood_park::{Area, AreaDraft, Attraction, AttractionDraft, Itinerary, ItineraryDraft};

use super::{AreaRepository, AttractionRepository, ItineraryRepository, StoreError, StoreResult};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS areas (
        id   BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attractions (
        id      BIGSERIAL PRIMARY KEY,
        name    TEXT NOT NULL,
        area_id BIGINT NOT NULL REFERENCES areas (id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS attractions_area_id_idx ON attractions (area_id)",
    r#"
    CREATE TABLE IF NOT EXISTS itineraries (
        id            BIGSERIAL PRIMARY KEY,
        starttime     TIMESTAMPTZ NOT NULL,
        attraction_id BIGINT NOT NULL REFERENCES attractions (id) ON DELETE CASCADE,
        customer_id   BIGINT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS itineraries_attraction_id_idx ON itineraries (attraction_id)",
];

/// Connect and make sure the park tables exist.
pub async fn connect(database_url: &str) -> StoreResult<PgPool> {
    let pool = PgPool::connect(database_url).await.map_err(storage)?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Idempotently create the park tables.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await.map_err(storage)?;
    }
    tracing::info!("park schema ready");
    Ok(())
}

fn storage(err: sqlx::Error) -> StoreError {
    StoreError::Storage(err.to_string())
}

/// Error mapping for inserts/updates: a dangling FK means bad input.
fn write_error(err: sqlx::Error) -> StoreError {
    let dangling = matches!(&err, sqlx::Error::Database(db) if db.is_foreign_key_violation());
    if dangling {
        StoreError::InvalidReference(err.to_string())
    } else {
        storage(err)
    }
}

fn affected<E: Entity>(rows: u64, id: E::Id) -> StoreResult<()> {
    if rows == 0 {
        Err(StoreError::not_found::<E>(id))
    } else {
        Ok(())
    }
}

fn area_from_row(row: &PgRow) -> StoreResult<Area> {
    Ok(Area {
        id: AreaId::new(row.try_get("id").map_err(storage)?),
        name: row.try_get("name").map_err(storage)?,
    })
}

fn attraction_from_row(row: &PgRow) -> StoreResult<Attraction> {
    Ok(Attraction {
        id: AttractionId::new(row.try_get("id").map_err(storage)?),
        name: row.try_get("name").map_err(storage)?,
        area_id: AreaId::new(row.try_get("area_id").map_err(storage)?),
    })
}

fn itinerary_from_row(row: &PgRow) -> StoreResult<Itinerary> {
    Ok(Itinerary {
        id: ItineraryId::new(row.try_get("id").map_err(storage)?),
        starttime: row.try_get::<DateTime<Utc>, _>("starttime").map_err(storage)?,
        attraction_id: AttractionId::new(row.try_get("attraction_id").map_err(storage)?),
        customer_id: CustomerId::new(row.try_get("customer_id").map_err(storage)?),
    })
}

#[derive(Debug, Clone)]
pub struct PostgresAreaRepository {
    pool: PgPool,
}

impl PostgresAreaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AreaRepository for PostgresAreaRepository {
    async fn get(&self, id: AreaId) -> StoreResult<Area> {
        let row = sqlx::query("SELECT id, name FROM areas WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        match row {
            Some(row) => area_from_row(&row),
            None => Err(StoreError::not_found::<Area>(id)),
        }
    }

    async fn list(&self) -> StoreResult<Vec<Area>> {
        sqlx::query("SELECT id, name FROM areas ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?
            .iter()
            .map(area_from_row)
            .collect()
    }

    async fn create(&self, draft: AreaDraft) -> StoreResult<Area> {
        let row = sqlx::query("INSERT INTO areas (name) VALUES ($1) RETURNING id, name")
            .bind(&draft.name)
            .fetch_one(&self.pool)
            .await
            .map_err(write_error)?;
        area_from_row(&row)
    }

    async fn save(&self, area: &Area) -> StoreResult<()> {
        let result = sqlx::query("UPDATE areas SET name = $2 WHERE id = $1")
            .bind(area.id.get())
            .bind(&area.name)
            .execute(&self.pool)
            .await
            .map_err(write_error)?;
        affected::<Area>(result.rows_affected(), area.id)
    }

    async fn delete(&self, id: AreaId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM areas WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        affected::<Area>(result.rows_affected(), id)
    }
}

#[derive(Debug, Clone)]
pub struct PostgresAttractionRepository {
    pool: PgPool,
}

impl PostgresAttractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttractionRepository for PostgresAttractionRepository {
    async fn get(&self, id: AttractionId) -> StoreResult<Attraction> {
        let row = sqlx::query("SELECT id, name, area_id FROM attractions WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        match row {
            Some(row) => attraction_from_row(&row),
            None => Err(StoreError::not_found::<Attraction>(id)),
        }
    }

    async fn list(&self, area: Option<AreaId>) -> StoreResult<Vec<Attraction>> {
        let rows = match area {
            Some(area_id) => {
                sqlx::query("SELECT id, name, area_id FROM attractions WHERE area_id = $1 ORDER BY id")
                    .bind(area_id.get())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT id, name, area_id FROM attractions ORDER BY id")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(storage)?;

        rows.iter().map(attraction_from_row).collect()
    }

    async fn create(&self, draft: AttractionDraft) -> StoreResult<Attraction> {
        let row = sqlx::query(
            "INSERT INTO attractions (name, area_id) VALUES ($1, $2) RETURNING id, name, area_id",
        )
        .bind(&draft.name)
        .bind(draft.area_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;
        attraction_from_row(&row)
    }

    async fn save(&self, attraction: &Attraction) -> StoreResult<()> {
        let result = sqlx::query("UPDATE attractions SET name = $2, area_id = $3 WHERE id = $1")
            .bind(attraction.id.get())
            .bind(&attraction.name)
            .bind(attraction.area_id.get())
            .execute(&self.pool)
            .await
            .map_err(write_error)?;
        affected::<Attraction>(result.rows_affected(), attraction.id)
    }

    async fn delete(&self, id: AttractionId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM attractions WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        affected::<Attraction>(result.rows_affected(), id)
    }
}

#[derive(Debug, Clone)]
pub struct PostgresItineraryRepository {
    pool: PgPool,
}

impl PostgresItineraryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItineraryRepository for PostgresItineraryRepository {
    async fn get(&self, id: ItineraryId) -> StoreResult<Itinerary> {
        let row = sqlx::query(
            "SELECT id, starttime, attraction_id, customer_id FROM itineraries WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        match row {
            Some(row) => itinerary_from_row(&row),
            None => Err(StoreError::not_found::<Itinerary>(id)),
        }
    }

    async fn list(&self) -> StoreResult<Vec<Itinerary>> {
        sqlx::query("SELECT id, starttime, attraction_id, customer_id FROM itineraries ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?
            .iter()
            .map(itinerary_from_row)
            .collect()
    }

    async fn create(&self, draft: ItineraryDraft, customer: CustomerId) -> StoreResult<Itinerary> {
        let row = sqlx::query(
            r#"
            INSERT INTO itineraries (starttime, attraction_id, customer_id)
            VALUES ($1, $2, $3)
            RETURNING id, starttime, attraction_id, customer_id
            "#,
        )
        .bind(draft.starttime)
        .bind(draft.attraction_id.get())
        .bind(customer.get())
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;
        itinerary_from_row(&row)
    }

    async fn save(&self, itinerary: &Itinerary) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE itineraries
            SET starttime = $2, attraction_id = $3, customer_id = $4
            WHERE id = $1
            "#,
        )
        .bind(itinerary.id.get())
        .bind(itinerary.starttime)
        .bind(itinerary.attraction_id.get())
        .bind(itinerary.customer_id.get())
        .execute(&self.pool)
        .await
        .map_err(write_error)?;
        affected::<Itinerary>(result.rows_affected(), itinerary.id)
    }

    async fn delete(&self, id: ItineraryId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM itineraries WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        affected::<Itinerary>(result.rows_affected(), id)
    }

    async fn delete_for_attraction(&self, attraction: AttractionId) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM itineraries WHERE attraction_id = $1")
            .bind(attraction.get())
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected())
    }
}
