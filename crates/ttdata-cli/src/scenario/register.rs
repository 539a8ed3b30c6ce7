use serde_json::json;
use ttdata_client::{Client, ClientError};
use ttdata_client::schemas::{
    COVID19_DATA_TYPE, DeviceRecord, SharedDataQuery, TEST_CATEGORY, UploadDataSchema,
};

use super::{ScenarioReport, StageStatus, check_status};
use crate::logging::print_stage;
use crate::{print_err, print_info};

/// One hand-written Toronto record, keyed `date|province_state|county|country_region`.
pub fn synthetic_upload(device_id: &str) -> UploadDataSchema {
    let record = json!({
        "date": "2020-05-09",
        "province_state": "ON",
        "country_region": "Canada",
        "county": "Toronto",
        "last_update": "2020-05-03T10:43:02",
        "confirmed": 370,
        "deaths": 84,
        "recovered": 14,
        "latitude": 43.6532,
        "longitude": 79.3832
    });
    let record: DeviceRecord = match record {
        serde_json::Value::Object(map) => map,
        _ => DeviceRecord::new(),
    };

    UploadDataSchema::new(
        COVID19_DATA_TYPE,
        device_id.to_string(),
        "date|province_state|county|country_region".to_string(),
        vec![record],
    )
}

/// Register `device_id`, upload one record with the issued key, then fetch the shared data.
///
/// The access key is stored on `client` and stays there for later scenarios.
/// When registration yields no key the `register` stage fails and the other
/// stages still run with whatever key the session already holds. Only
/// transport errors end the scenario early.
pub fn check_register_upload_fetch(
    client: &mut Client,
    device_id: &str,
) -> anyhow::Result<ScenarioReport> {
    let mut report = ScenarioReport::default();

    print_info!("== /register ==");
    let status = match client.request_access_key(device_id, TEST_CATEGORY) {
        Ok(access_key) => {
            print_info!("{access_key}");
            client.set_access_key(access_key);
            StageStatus::Pass
        }
        Err(e @ ClientError::Transport(_)) => return Err(e.into()),
        Err(e) => {
            print_err!("Failed to register device {device_id}: {e}");
            StageStatus::Failed
        }
    };
    print_stage("register", status);
    report.record("register", status);

    print_info!("== /uploaddata ==");
    let response = client.upload_data(&synthetic_upload(device_id))?;
    print_info!("{response}");
    report.record("uploaddata", check_status("uploaddata", &response));

    print_info!("== /getshareddata ==");
    let response =
        client.get_shared_data(&SharedDataQuery::new(COVID19_DATA_TYPE, device_id.to_string()))?;
    print_info!("{response}");
    report.record("getshareddata", check_status("getshareddata", &response));

    Ok(report)
}
