/// Application layer - Use cases, services and DTOs
///
/// This layer orchestrates domain services and reaches infrastructure only
/// through ports.
pub mod dto;
pub mod factories;
pub mod services;
pub mod use_cases;
