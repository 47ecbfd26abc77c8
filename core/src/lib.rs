//! Typed API client core for the SurvivalChallenge filter service.
//!
//! # Overview
//! Endpoints describe one HTTP operation declaratively (environment, path,
//! method, headers, params) and know how to build an `HttpRequest` and parse
//! an `HttpResponse`. `execute` runs one round trip through a `Transport`.
//! `ApiService` applies this to the challenge-filter listing and
//! `ChallengeCatalog` organises the result for the home screen.
//!
//! # Design
//! - Request building and response parsing never touch the network, so the
//!   FFI layer can let a host app do its own I/O.
//! - No component keeps state across calls: no retry, no caching.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use api::SurvivalChallengeApi;
pub use catalog::{ChallengeCatalog, DesignType, RankingCellStyle, TopCategory};
pub use client::{execute, execute_model};
pub use config::ClientConfig;
pub use endpoint::{Endpoint, Environment, Params};
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::ApiService;
pub use transport::{Transport, UreqTransport};
pub use types::{ApiResponse, ChallengeEntity, ImageUrl};
