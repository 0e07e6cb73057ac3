// src/models.rs

pub mod address;
pub mod assistant;
pub mod auth;
pub mod case;
pub mod client;
pub mod dashboard;
pub mod movement;
