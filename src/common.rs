// src/common.rs

pub mod error;
pub mod filename;
pub mod format;
