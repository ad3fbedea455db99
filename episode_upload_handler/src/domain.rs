//! Episode upload domain: models, ports and the service tying them together

pub mod models;
pub mod ports;
pub mod service;
