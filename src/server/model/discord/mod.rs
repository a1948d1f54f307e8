pub mod guild_member;
pub mod role;

pub use guild_member::GuildMember;
pub use role::RoleHierarchy;
