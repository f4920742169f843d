//! Shared HTTP plumbing for loanform services: health routes, request-id and
//! trace layers, and tracing initialisation.

pub mod health;
pub mod middleware;
pub mod tracing;
