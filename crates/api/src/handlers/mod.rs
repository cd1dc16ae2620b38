//! HTTP handlers, one module per resource.

pub mod feedbacks;
pub mod report;
