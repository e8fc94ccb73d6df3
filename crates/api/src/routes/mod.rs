//! HTTP route handlers

pub mod alerts;
pub mod classify;
pub mod forecast;
