//! Client library for Microsoft Purview REST APIs
//!
//! Wraps the Data Map, Catalog, Data Quality and Workflow surfaces behind a
//! shared HTTP core: a cached, single-flight token provider and a retrying
//! request dispatcher. See the `api` module for the client types.

pub mod api;
pub mod config;

pub use api::{
    ApiError, ApiResult, CatalogClient, Credentials, DataMapClient, DataQualityClient,
    PurviewClient, TokenProvider, WorkflowClient,
};
pub use config::Config;
