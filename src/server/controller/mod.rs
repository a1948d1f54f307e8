//! HTTP handlers for the wallet-connection page.
//!
//! Handlers convert DTOs to domain parameters, call the service layer and convert the
//! result back. Errors are returned as `AppError` and mapped to responses there.

pub mod verification;
