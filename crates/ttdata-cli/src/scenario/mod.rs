//! The end-to-end checks run against a TTData server.
//!
//! - [`register`] - register a device, upload one record with its key, read it back
//! - [`bulk`] - upload a CSSE daily report in batches, read the shared data back
//!
//! A failed stage is reported and the run goes on; only transport and
//! dataset errors abort a scenario.

pub mod bulk;
pub mod register;
mod status;

pub use bulk::{BulkUploadConfig, check_bulk_upload};
pub use register::{check_register_upload_fetch, synthetic_upload};
pub use status::*;
