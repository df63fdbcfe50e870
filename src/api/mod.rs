//! Purview REST API client module
//!
//! The core is split the same way the service is: one shared HTTP layer
//! (token provider, dispatcher, retry policy) and one thin resource client
//! per API surface. All surfaces share a single bearer token but carry their
//! own base paths and API versions.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod constants;
pub mod datamap;
pub mod error;
pub mod models;
pub mod quality;
pub mod resilience;
pub mod workflow;

pub use auth::TokenProvider;
pub use catalog::{CatalogClient, LineageDirection};
pub use client::PurviewClient;
pub use datamap::DataMapClient;
pub use error::{ApiError, ApiResult};
pub use models::{ApiResponse, Credentials, SearchOptions, TokenInfo};
pub use quality::DataQualityClient;
pub use resilience::{FailureClass, RetryConfig, RetryPolicy};
pub use workflow::WorkflowClient;
