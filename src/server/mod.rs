//! Server-side API backend and business logic.
//!
//! This module contains the complete backend implementation for the application,
//! including API endpoints, business logic, data access, and infrastructure services.
//! The backend uses Axum as the web framework, SeaORM for database operations,
//! Serenity for Discord bot integration and Solana JSON-RPC for token balances.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers for the wallet-connection page
//! - **Service Layer** (`service/`) - Reconciliation, balance lookups, Discord access and wallet linking
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, reconciler, verification codes)
//! - **Startup** (`startup`) - Logging, database and reconciler initialization
//! - **Router** (`router`) - Axum route configuration
//! - **Scheduler** (`scheduler/`) - Periodic reconciliation of roles with token balances
//! - **Bot** (`bot/`) - Discord gateway connection and the `/verify` command
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to the verification controller
//! 2. **Controller** validates the payload, converts DTOs to params, calls the service
//! 3. **Service** verifies the wallet, evaluates balances and converges the member's role
//! 4. **Data** reads and writes tenant configs and holders as domain models
//! 5. **Controller** converts the outcome to a DTO and returns the HTTP response

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
