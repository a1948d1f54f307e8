//! Discord bot integration.
//!
//! The bot keeps serenity's cache of guilds, roles and members warm for the
//! reconciliation loop and publishes when that cache is first populated. It answers
//! `/verify` with a personal wallet-connection link, and lets admins configure the gate
//! with `/server-setup` and `/edit-config`. It runs in its own tokio task; its cache and
//! HTTP client are shared with the reconciler through `SerenityGuildGateway`.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, role and channel events that populate the cache
//! - `GUILD_MEMBERS` - Member updates so cached roles stay current (privileged intent)
//!
//! `GUILD_MEMBERS` must be explicitly enabled in the Discord Developer Portal for the bot
//! application.

pub mod handler;
pub mod start;
