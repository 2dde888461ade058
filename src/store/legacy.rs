use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::StoreError;
use crate::pools::types::{EarningRow, Gathered, PoolPosition, PoolStatus};

/// Pool document from before earning periods existed: one flat window per pool
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPoolRecord {
    pub id: String,
    pub pool_name: String,
    #[serde(default)]
    pub token_symbol: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    pub range_from: Decimal,
    pub range_to: Decimal,
    #[serde(default)]
    pub principal: Decimal,
    #[serde(default)]
    pub earnings: Decimal,
    pub status: PoolStatus,
    #[serde(default)]
    pub comments: Option<String>,
}

impl From<LegacyPoolRecord> for PoolPosition {
    fn from(legacy: LegacyPoolRecord) -> Self {
        let seed_row = EarningRow {
            id: format!("{}-legacy", legacy.id),
            principal: legacy.principal,
            start_date: legacy.start_date,
            end_date: legacy.end_date,
            earnings: legacy.earnings,
            gathered: Gathered::No,
        };
        PoolPosition {
            id: legacy.id,
            pool_name: legacy.pool_name,
            token_symbol: legacy.token_symbol,
            range_from: legacy.range_from,
            range_to: legacy.range_to,
            status: legacy.status,
            earning_rows: vec![seed_row],
            comments: legacy.comments,
        }
    }
}

/// Decodes a stored pool document of any known shape into the current one
pub fn upcast_pool_record(record: Value) -> Result<PoolPosition, StoreError> {
    let Value::Object(fields) = &record else {
        return Err(StoreError::UnknownShape(format!("expected a pool object, got {}", record)));
    };

    if fields.contains_key("earningRows") {
        return Ok(serde_json::from_value(record)?);
    }
    if fields.contains_key("startDate") || fields.contains_key("principal") {
        let legacy: LegacyPoolRecord = serde_json::from_value(record)?;
        debug!(pool_id = %legacy.id, "Upcasting legacy flat pool record");
        return Ok(legacy.into());
    }

    let id = fields.get("id").and_then(Value::as_str).unwrap_or("<missing id>");
    Err(StoreError::UnknownShape(format!("pool {} has neither earningRows nor legacy fields", id)))
}
