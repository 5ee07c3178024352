//! Infrastructure layer: concrete repositories and transport DTOs.

pub mod dto;
pub mod repository;
