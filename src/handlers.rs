// src/handlers.rs

pub mod address;
pub mod assistant;
pub mod auth;
pub mod cases;
pub mod clients;
pub mod dashboard;
pub mod movements;
pub mod multipart;
