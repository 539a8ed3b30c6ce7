//! Request and response schemas of the TTData API.
//!
//! - [`request`] - bodies sent to `/register` and `/uploaddata`
//! - [`response`] - bodies received from the API
//!
//! Common types are re-exported at the module level for convenience.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
