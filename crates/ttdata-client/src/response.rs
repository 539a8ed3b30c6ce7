use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::payload::{JsonParse, json_parse_if_possible};

/// A fully read HTTP response. Non-success statuses are data, not errors.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub elapsed: Duration,
    pub body: String,
}

impl ApiResponse {
    pub(crate) fn read(
        response: reqwest::blocking::Response,
        elapsed: Duration,
    ) -> Result<Self, ClientError> {
        let status = response.status();
        let body = response.text()?;
        Ok(Self {
            status,
            elapsed,
            body,
        })
    }

    /// Whether the status is 2xx.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn body_json(&self) -> JsonParse {
        json_parse_if_possible(&self.body)
    }

    pub fn json<R: DeserializeOwned>(&self) -> Result<R, ClientError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Response [{}]>", self.status.as_u16())
    }
}
