use rusqlite::{params, TransactionBehavior};
use serde_json::{Map, Value};

use crate::content::site::{SiteData, SitePatch};
use crate::db::DbPool;
use crate::store::StoreError;

/// Read every stored site key into a patch. Keys absent from the table stay
/// `None` and pick up compiled-in defaults at merge time; rows that fail to
/// parse are dropped rather than failing the whole read.
pub fn fetch(pool: &DbPool) -> Result<SitePatch, StoreError> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare("SELECT key, value FROM site_data")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut object = Map::new();
    for row in rows {
        let (key, raw) = row?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => {
                object.insert(key, value);
            }
            Err(err) => {
                tracing::warn!("Dropping unparseable site_data row {}: {}", key, err);
            }
        }
    }

    Ok(serde_json::from_value(Value::Object(object))?)
}

/// Upsert every key of the merged site object, one row per key. Keys are
/// never deleted, so values written by newer builds survive older ones.
pub fn replace(pool: &DbPool, site: &SiteData) -> Result<(), StoreError> {
    let value = serde_json::to_value(site)?;
    let object = value.as_object().cloned().unwrap_or_default();

    let mut conn = pool.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    for (key, value) in &object {
        tx.execute(
            "INSERT INTO site_data (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
               value = excluded.value,
               updated_at = excluded.updated_at",
            params![key, serde_json::to_string(value)?],
        )?;
    }
    tx.commit()?;
    Ok(())
}
