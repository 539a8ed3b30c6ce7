mod client;
pub mod credentials;
pub mod error;
pub mod payload;
mod response;
pub mod schemas;
pub mod source;
pub mod table;
pub mod upload;

pub use crate::client::*;
pub use credentials::AccessKey;
pub use error::ClientError;
pub use payload::{JsonParse, Payload, json_parse_if_possible};
pub use response::ApiResponse;
