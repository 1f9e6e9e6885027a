use async_trait::async_trait;
use sqlx::Row;
use tracing::warn;

use crate::db::DbPool;
use crate::error::Result;
use crate::types::{
    CountSession, MasterQuantities, RawQuantity, StockCountRecord, SystemQuantity,
};

/// Read side of the count database as the export pipeline sees it.
#[async_trait]
pub trait CountSource: Send + Sync {
    /// All records, newest id first.
    async fn fetch_records(&self) -> Result<Vec<StockCountRecord>>;
    async fn fetch_sessions(&self) -> Result<Vec<CountSession>>;
    async fn fetch_master_quantities(&self) -> Result<MasterQuantities>;
}

#[derive(Clone)]
pub struct SqliteCountStore {
    pool: DbPool,
}

impl SqliteCountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn count_records(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stock_counts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CountSource for SqliteCountStore {
    async fn fetch_records(&self) -> Result<Vec<StockCountRecord>> {
        // SQLite does not enforce declared types, so free-form columns are read back as text.
        let rows = sqlx::query(
            r#"
                SELECT
                    id,
                    session_id,
                    CAST(COALESCE(timestamp, '') AS TEXT) AS timestamp,
                    item_code,
                    item_description,
                    CAST(counted_qty AS TEXT) AS counted_qty,
                    counted_location,
                    bin_location_system,
                    username
                FROM stock_counts
                ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(StockCountRecord {
                id: row.try_get("id")?,
                session_id: row.try_get("session_id")?,
                timestamp: row.try_get("timestamp")?,
                item_code: row.try_get("item_code")?,
                item_description: row.try_get("item_description")?,
                counted_qty: RawQuantity(row.try_get("counted_qty")?),
                counted_location: row.try_get("counted_location")?,
                bin_location_system: row.try_get("bin_location_system")?,
                username: row.try_get("username")?,
            });
        }
        Ok(records)
    }

    async fn fetch_sessions(&self) -> Result<Vec<CountSession>> {
        let rows = sqlx::query(
            r#"
                SELECT id, user_username, inventory_stage
                FROM count_sessions
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in rows {
            sessions.push(CountSession {
                id: row.try_get("id")?,
                owner_username: row.try_get("user_username")?,
                inventory_stage: row.try_get("inventory_stage")?,
            });
        }
        Ok(sessions)
    }

    async fn fetch_master_quantities(&self) -> Result<MasterQuantities> {
        let rows = sqlx::query(
            r#"
                SELECT item_code, CAST(system_qty AS TEXT) AS system_qty
                FROM master_quantities
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut quantities = MasterQuantities::with_capacity(rows.len());
        for row in rows {
            let item_code: String = row.try_get("item_code")?;
            let raw: String = row.try_get("system_qty")?;
            let quantity = SystemQuantity::parse(&raw);
            if quantity.as_number().is_none() {
                warn!(
                    item_code = %item_code,
                    raw = %raw,
                    "master quantity is not numeric; difference will be left empty"
                );
            }
            quantities.insert(item_code, quantity);
        }
        Ok(quantities)
    }
}
