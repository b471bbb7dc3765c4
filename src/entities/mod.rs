//! Entity types

pub mod service_case;

pub use service_case::{NewCase, ServiceCase, DEFAULT_STATUS};
