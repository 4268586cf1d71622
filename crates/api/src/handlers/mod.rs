//! HTTP handlers, one module per ordered collection.

pub mod performances;
pub mod sets;
pub mod tracks;
