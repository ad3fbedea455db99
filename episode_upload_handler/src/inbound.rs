//! Adapters which drive the domain

pub mod lambda;
