//! Sequential batched upload of a table to `/uploaddata`.

use std::ops::Range;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use crate::client::Client;
use crate::error::ClientError;
use crate::schemas::{COVID19_DATA_TYPE, DeviceRecord, UploadDataSchema};
use crate::table::{DATE_COLUMN, KeyColumns, Table, normalize};

/// Result of posting one batch.
#[derive(Debug, Clone)]
pub struct BatchReceipt {
    /// Zero-based index of the batch.
    pub index: usize,
    /// Table rows the batch carried.
    pub rows: Range<usize>,
    pub status: StatusCode,
    pub elapsed: Duration,
    pub body: String,
}

impl BatchReceipt {
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }
}

/// Consecutive row ranges of at most `batch_size` rows, at most `max_batches` of them.
pub fn plan_batches(
    total_rows: usize,
    batch_size: usize,
    max_batches: usize,
) -> Result<Vec<Range<usize>>, ClientError> {
    if batch_size == 0 {
        return Err(ClientError::InvalidBatchSize);
    }

    Ok((0..total_rows)
        .step_by(batch_size)
        .take(max_batches)
        .map(|start| start..usize::min(start + batch_size, total_rows))
        .collect())
}

/// `record` with `date` first, overriding any `date` column of its own.
pub fn tag_with_date(record: DeviceRecord, date: &str) -> DeviceRecord {
    let mut tagged = DeviceRecord::new();
    tagged.insert(DATE_COLUMN.to_string(), date.into());
    tagged.extend(record.into_iter().filter(|(column, _)| column != DATE_COLUMN));
    tagged
}

/// Upload body for `rows` of an already normalized table.
pub fn build_batch(
    device_id: &str,
    key: &KeyColumns,
    table: &Table,
    rows: Range<usize>,
    date: &str,
) -> UploadDataSchema {
    let device_data = rows
        .filter_map(|idx| table.record(idx))
        .map(|record| tag_with_date(record, date))
        .collect();

    UploadDataSchema::new(
        COVID19_DATA_TYPE,
        device_id.to_string(),
        key.to_string(),
        device_data,
    )
}

/// Normalize `table` and post it in batches; see [`upload_in_batches_with`].
pub fn upload_in_batches(
    client: &Client,
    device_id: &str,
    table: Table,
    date: &str,
    batch_size: usize,
    max_batches: usize,
) -> Result<usize, ClientError> {
    upload_in_batches_with(
        client,
        device_id,
        table,
        date,
        batch_size,
        max_batches,
        |_| {},
    )
}

/// Normalize `table` and post it to `/uploaddata` one batch at a time.
///
/// Every record is tagged with `date`. At most `max_batches` batches are sent;
/// `on_batch` sees each receipt as it arrives. A failed status does not stop
/// the upload, a transport error does.
///
/// Returns `table.len() / batch_size`, the number of full batches in the
/// table. This is independent of how many batches were sent when
/// `max_batches` truncates the upload.
pub fn upload_in_batches_with(
    client: &Client,
    device_id: &str,
    table: Table,
    date: &str,
    batch_size: usize,
    max_batches: usize,
    mut on_batch: impl FnMut(&BatchReceipt),
) -> Result<usize, ClientError> {
    let (table, key) = normalize(table);
    let total_rows = table.len();
    let batches = plan_batches(total_rows, batch_size, max_batches)?;

    for (index, rows) in batches.into_iter().enumerate() {
        debug!(
            "For batch from: {} to {}",
            rows.start,
            rows.end.saturating_sub(1)
        );

        let batch = build_batch(device_id, &key, &table, rows.clone(), date);
        let response = client.upload_data(&batch)?;

        debug!("{}", response.elapsed.as_secs_f64());
        debug!("{}", response.status.as_u16());
        debug!("{}", response.body);

        on_batch(&BatchReceipt {
            index,
            rows,
            status: response.status,
            elapsed: response.elapsed,
            body: response.body,
        });
    }

    Ok(total_rows / batch_size)
}
