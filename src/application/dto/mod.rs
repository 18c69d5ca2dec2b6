//! # Data Transfer Objects

pub mod resolve_request;
