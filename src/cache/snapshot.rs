//! Decoding and scanning of the catalog snapshot.
//!
//! The snapshot is a JSON array of product-shaped records stored under one
//! cache key. There is no index: every lookup decodes the array and scans it
//! linearly for the first record whose `id` matches.

use super::CacheError;
use crate::domain::{Product, ProductId};

/// Finds `id` in a raw snapshot.
///
/// Records are decoded individually, so a malformed record only matters if
/// it is the one that matches.
///
/// # Errors
///
/// Returns [`CacheError::Decode`] if the snapshot is not a JSON array, or if
/// the matching record is not a valid product.
pub fn find_in_snapshot(raw: &str, id: ProductId) -> Result<Option<Product>, CacheError> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| CacheError::Decode(e.to_string()))?;

    let Some(record) = records
        .into_iter()
        .find(|r| r.get("id").and_then(serde_json::Value::as_i64) == Some(id.get()))
    else {
        return Ok(None);
    };

    let product: Product =
        serde_json::from_value(record).map_err(|e| CacheError::Decode(e.to_string()))?;
    product
        .validate()
        .map_err(|e| CacheError::Decode(e.to_string()))?;
    Ok(Some(product))
}

/// Checks that `raw` is a JSON array and returns its length.
///
/// Used by the catalog loader before storing a snapshot.
///
/// # Errors
///
/// Returns [`CacheError::Decode`] if `raw` is not a JSON array.
pub fn snapshot_len(raw: &str) -> Result<usize, CacheError> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| CacheError::Decode(e.to_string()))?;
    Ok(records.len())
}
