//! Liveness check, mounted outside the versioned API prefix

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::API_BASE_PATH;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    /// Where the resource routes live, so clients need not hardcode it
    pub api: &'static str,
}

impl Health {
    const fn up() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            api: API_BASE_PATH,
        }
    }
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(|| async { Json(Health::up()) }))
}
