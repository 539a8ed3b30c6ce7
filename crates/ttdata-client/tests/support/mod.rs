//! Mock TTData server built on wiremock.
//!
//! - `POST /register` answers with the configured body, `{"code": 0, "data": <key>}` by default
//! - `GET /reports/<name>.csv` serves the configured CSV
//! - any other request answers 200 when it carries an `appkey` header, 401 otherwise

#![allow(dead_code)]

use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::matchers::{any, header_exists, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub appkey: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

impl From<&Request> for RecordedRequest {
    fn from(request: &Request) -> Self {
        let header = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(String::from)
        };
        let path = match request.url.query() {
            Some(query) => format!("{}?{query}", request.url.path()),
            None => request.url.path().to_string(),
        };

        Self {
            method: request.method.as_str().to_string(),
            path,
            appkey: header("appkey"),
            content_type: header("content-type"),
            body: String::from_utf8_lossy(&request.body).into_owned(),
        }
    }
}

/// A running mock server. The blocking client under test talks to it from the test thread.
pub struct StubServer {
    server: MockServer,
    runtime: Runtime,
}

impl StubServer {
    pub fn start(access_key: &str) -> Self {
        Self::start_with_csv(access_key, "")
    }

    pub fn start_with_csv(access_key: &str, csv: &str) -> Self {
        Self::mount(json!({"code": 0, "data": access_key}), csv)
    }

    /// Server whose `/register` answers `register_body` verbatim.
    pub fn start_with_register_body(register_body: Value) -> Self {
        Self::mount(register_body, "")
    }

    fn mount(register_body: Value, csv: &str) -> Self {
        let runtime = Runtime::new().expect("tokio runtime should start");
        let server = runtime.block_on(async {
            let server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/register"))
                .respond_with(ResponseTemplate::new(200).set_body_json(register_body))
                .with_priority(1)
                .mount(&server)
                .await;

            Mock::given(method("GET"))
                .and(path_regex(r"^/reports/.+"))
                .respond_with(ResponseTemplate::new(200).set_body_raw(csv, "text/csv"))
                .with_priority(1)
                .mount(&server)
                .await;

            Mock::given(header_exists("appkey"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({"code": 0, "msg": "ok"})),
                )
                .with_priority(2)
                .mount(&server)
                .await;

            Mock::given(any())
                .respond_with(
                    ResponseTemplate::new(401)
                        .set_body_json(json!({"code": 401, "msg": "missing appkey"})),
                )
                .with_priority(3)
                .mount(&server)
                .await;

            server
        });

        Self { server, runtime }
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(RecordedRequest::from)
            .collect()
    }

    pub fn requests_to(&self, path_prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(path_prefix))
            .collect()
    }
}

/// A daily report with `rows` US counties.
pub fn county_report(rows: usize) -> String {
    let mut csv = String::from(
        "FIPS,Admin2,Province_State,Country_Region,Last_Update,Lat,Long_,Confirmed,Deaths,Recovered,Active,Combined_Key\n",
    );
    for i in 0..rows {
        csv.push_str(&format!(
            "{:05},County {i},State {},US,2020-05-18 02:32:21,32.5,-86.6,{},{},0,0,\"County {i}, US\"\n",
            1000 + i,
            i % 50,
            i * 3,
            i % 7
        ));
    }
    csv
}
