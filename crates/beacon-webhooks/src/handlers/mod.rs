//! HTTP handlers for webhook endpoints.

pub mod register;
