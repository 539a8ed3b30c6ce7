use std::time::Instant;

use anyhow::Context;
use ttdata_client::Client;
use ttdata_client::schemas::{COVID19_DATA_TYPE, SharedDataQuery};
use ttdata_client::source::DatasetSource;
use ttdata_client::upload::upload_in_batches_with;

use super::{ScenarioReport, StageStatus, check_status};
use crate::print_info;

pub const DEFAULT_REPORT_DATE: &str = "05-17-2020";
pub const DEFAULT_DATA_DATE: &str = "2020-05-09";
pub const DEFAULT_BATCH_SIZE: usize = 200;
/// Large enough to upload any daily report in full.
pub const DEFAULT_MAX_BATCHES: usize = 9999;

#[derive(Debug, Clone)]
pub struct BulkUploadConfig {
    /// Explicit dataset; the CSSE report for `report_date` otherwise.
    pub source: Option<DatasetSource>,
    /// CSSE report to fetch, `MM-DD-YYYY`.
    pub report_date: String,
    /// Date every uploaded record is tagged with.
    pub date: String,
    pub batch_size: usize,
    /// `0` uploads nothing.
    pub max_batches: usize,
}

impl Default for BulkUploadConfig {
    fn default() -> Self {
        Self {
            source: None,
            report_date: DEFAULT_REPORT_DATE.to_string(),
            date: DEFAULT_DATA_DATE.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            max_batches: DEFAULT_MAX_BATCHES,
        }
    }
}

impl BulkUploadConfig {
    pub fn source(&self) -> anyhow::Result<DatasetSource> {
        match &self.source {
            Some(source) => Ok(source.clone()),
            None => DatasetSource::csse_daily_report(&self.report_date)
                .with_context(|| format!("Invalid report date {}", self.report_date)),
        }
    }
}

/// Upload a daily report in batches under `device_id`, then fetch the shared data.
///
/// Expects `client` to already carry the device's access key.
pub fn check_bulk_upload(
    client: &Client,
    device_id: &str,
    config: &BulkUploadConfig,
) -> anyhow::Result<ScenarioReport> {
    let mut report = ScenarioReport::default();
    let source = config.source()?;

    let started = Instant::now();
    print_info!("processing: {source}");
    let table = source
        .load()
        .with_context(|| format!("Failed to load dataset {source}"))?;

    upload_in_batches_with(
        client,
        device_id,
        table,
        &config.date,
        config.batch_size,
        config.max_batches,
        |receipt| {
            print_info!(
                "For batch from: {}, to: {}",
                receipt.rows.start,
                receipt.rows.end.saturating_sub(1)
            );
            print_info!("{}", receipt.elapsed.as_secs_f64());
            print_info!("{}", receipt.status.as_u16());
            print_info!("{}", receipt.body);
            report.record(
                format!("uploaddata batch {}", receipt.index),
                StageStatus::from(receipt.ok()),
            );
        },
    )
    .context("Batch upload failed")?;
    print_info!(
        "{}  {:2.2} sec",
        "uploaddata",
        started.elapsed().as_secs_f64()
    );

    print_info!("== /getshareddata ==");
    let started = Instant::now();
    let response =
        client.get_shared_data(&SharedDataQuery::new(COVID19_DATA_TYPE, device_id.to_string()))?;
    report.record("getshareddata", check_status("getshareddata", &response));
    print_info!(
        "{}  {:2.2} sec",
        "getshareddata",
        started.elapsed().as_secs_f64()
    );

    Ok(report)
}
