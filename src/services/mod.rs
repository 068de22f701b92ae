
pub mod auth_service;
pub mod issue_service;
pub mod estimation_service;
