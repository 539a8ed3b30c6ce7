use std::time::Instant;

use reqwest::Method;
use tracing::debug;
use url::form_urlencoded;

use crate::credentials::AccessKey;
use crate::error::ClientError;
use crate::payload::Payload;
use crate::response::ApiResponse;
use crate::schemas::{RegisterResponseSchema, RegisterSchema, SharedDataQuery, UploadDataSchema};

/// Header carrying the access key once a device is registered.
pub const APPKEY_HEADER: &str = "appkey";

/// Join `base` and `route` with exactly one slash at the join point.
pub fn build_url(base: &str, route: &str) -> String {
    let base = base.trim_end_matches('/');
    let route = route.trim_start_matches('/');
    format!("{base}/{route}")
}

/// A session with one TTData server.
///
/// The session owns the base URL and, after registration, the access key that
/// authenticates every following call. Responses are returned as-is whatever
/// their status; only transport failures are errors.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::blocking::Client,
    base_url: String,
    access_key: Option<AccessKey>,
}

impl Client {
    /// Create a new unauthenticated session against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            access_key: None,
        }
    }

    pub fn with_access_key(mut self, access_key: AccessKey) -> Self {
        self.access_key = Some(access_key);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn access_key(&self) -> Option<&AccessKey> {
        self.access_key.as_ref()
    }

    pub fn set_access_key(&mut self, access_key: AccessKey) {
        self.access_key = Some(access_key);
    }

    pub fn url(&self, route: &str) -> String {
        build_url(&self.base_url, route)
    }

    pub fn get(&self, route: impl AsRef<str>) -> Result<ApiResponse, ClientError> {
        self.req(Method::GET, route.as_ref(), None)
    }

    pub fn post(
        &self,
        route: impl AsRef<str>,
        payload: impl Into<Payload>,
    ) -> Result<ApiResponse, ClientError> {
        self.req(Method::POST, route.as_ref(), Some(payload.into()))
    }

    fn req(
        &self,
        method: Method,
        route: &str,
        payload: Option<Payload>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.url(route);
        debug!("{method} {url}");

        let request_builder = self.http_client.request(method, url);

        let mut request_builder = match payload {
            Some(Payload::Structured(value)) => request_builder.json(&value),
            Some(Payload::Raw(text)) => request_builder.body(text),
            None => request_builder,
        };

        if let Some(key) = self.access_key.as_ref() {
            request_builder = request_builder.header(APPKEY_HEADER, key.as_str());
        }

        let started = Instant::now();
        let response = request_builder.send()?;
        let elapsed = started.elapsed();

        ApiResponse::read(response, elapsed)
    }

    /// `POST /register`
    pub fn register(&self, schema: &RegisterSchema) -> Result<ApiResponse, ClientError> {
        self.post("/register", Payload::structured(schema)?)
    }

    /// Register `device_id` and return the access key the server issued.
    ///
    /// The key is not stored on the session; call [`Client::set_access_key`].
    pub fn request_access_key(
        &self,
        device_id: &str,
        category: &str,
    ) -> Result<AccessKey, ClientError> {
        let schema = RegisterSchema::new(device_id.to_string(), category.to_string());
        let response = self.register(&schema)?;
        response.json::<RegisterResponseSchema>()?.access_key()
    }

    /// `POST /uploaddata`
    pub fn upload_data(&self, schema: &UploadDataSchema) -> Result<ApiResponse, ClientError> {
        self.post("/uploaddata", Payload::structured(schema)?)
    }

    /// `GET /getshareddata`
    pub fn get_shared_data(&self, query: &SharedDataQuery) -> Result<ApiResponse, ClientError> {
        self.get(shared_data_route(query))
    }
}

fn shared_data_route(query: &SharedDataQuery) -> String {
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("data_type", &query.data_type.to_string())
        .append_pair("device_id", &query.device_id)
        .finish();
    format!("/getshareddata?{params}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://h:1", "/r", "http://h:1/r")]
    #[case("http://h:1", "r", "http://h:1/r")]
    #[case("http://h:1/", "/r", "http://h:1/r")]
    #[case("http://h:1/", "r", "http://h:1/r")]
    #[case("http://h:1", "/getshareddata?data_type=2", "http://h:1/getshareddata?data_type=2")]
    #[case("http://h:1/api", "uploaddata", "http://h:1/api/uploaddata")]
    fn build_url_joins_with_a_single_slash(
        #[case] base: &str,
        #[case] route: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(build_url(base, route), expected);
    }

    #[test]
    fn build_url_with_empty_route_keeps_trailing_slash() {
        assert_eq!(build_url("http://h:1", ""), "http://h:1/");
    }

    #[test]
    fn shared_data_route_encodes_device_id() {
        let query = SharedDataQuery::new(2, "test ttdata&x".to_string());
        assert_eq!(
            shared_data_route(&query),
            "/getshareddata?data_type=2&device_id=test+ttdata%26x"
        );
    }

    #[test]
    fn access_key_is_set_once_registered() {
        let mut client = Client::new("http://127.0.0.1:9");
        assert!(client.access_key().is_none());

        client.set_access_key(AccessKey::new("k"));
        assert_eq!(client.access_key().map(AccessKey::as_str), Some("k"));
    }
}
