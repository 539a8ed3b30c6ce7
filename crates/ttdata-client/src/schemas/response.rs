use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::credentials::AccessKey;
use crate::error::ClientError;

#[derive(Debug, Deserialize)]
pub struct RegisterResponseSchema {
    /// `None` when the field is absent, `Some(Value::Null)` when it is `null`.
    #[serde(default, deserialize_with = "present")]
    pub data: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl RegisterResponseSchema {
    /// The access key carried in the `data` field.
    pub fn access_key(&self) -> Result<AccessKey, ClientError> {
        match &self.data {
            Some(Value::String(key)) => key.parse().map_err(ClientError::InvalidAccessKey),
            Some(Value::Null) => Err(ClientError::MissingAccessKey("`data` is null".to_string())),
            Some(other) => Err(ClientError::MissingAccessKey(other.to_string())),
            None => Err(ClientError::MissingAccessKey("no `data` field".to_string())),
        }
    }
}
