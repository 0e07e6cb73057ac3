// src/services.rs

pub mod address_service;
pub mod assistant_service;
pub mod auth;
pub mod case_detail;
pub mod case_service;
pub mod client_service;
pub mod movement_service;
pub mod session;
