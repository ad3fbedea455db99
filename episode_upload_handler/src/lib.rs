//! Lambda which records podcast episode metadata and authorizes the media upload.
//! Follows the hexagonal layout: the domain is pure, inbound drives it and outbound
//! implements its ports against AWS.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
