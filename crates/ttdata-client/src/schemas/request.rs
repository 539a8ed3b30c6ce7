use derive_new::new;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `data_type` of tabular case records.
pub const COVID19_DATA_TYPE: u32 = 2;

/// Category sent when registering test devices.
pub const TEST_CATEGORY: &str = "TEST";

/// One uploaded row: canonical column name to value.
pub type DeviceRecord = Map<String, Value>;

#[derive(Debug, Clone, Serialize, new)]
pub struct RegisterSchema {
    pub device_id: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, new)]
pub struct UploadDataSchema {
    pub data_type: u32,
    pub device_id: String,
    /// Pipe-delimited natural key, e.g. `country_region|province_state|date`.
    pub key: String,
    pub device_data: Vec<DeviceRecord>,
}

#[derive(Debug, Clone, Serialize, new)]
pub struct SharedDataQuery {
    pub data_type: u32,
    pub device_id: String,
}
