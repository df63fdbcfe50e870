pub mod auth;
pub mod entity;
pub mod quality;
pub mod search;
pub mod workflow;
