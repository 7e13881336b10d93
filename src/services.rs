pub mod auth;
pub mod workflow_service;
