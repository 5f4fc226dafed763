use serde::Serialize;

use crate::errors::{AppError, Result};

/// Serializes rows to CSV with a header taken from the first row's fields.
pub fn to_csv<T, I>(rows: I) -> Result<Vec<u8>>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::service(format!("CSV flush failed: {}", e)))
}
