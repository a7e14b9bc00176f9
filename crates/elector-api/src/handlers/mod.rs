//! HTTP handlers for the elector API

pub mod health;
pub mod predict;
