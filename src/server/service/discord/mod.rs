pub mod guild_gateway;

pub use guild_gateway::SerenityGuildGateway;
