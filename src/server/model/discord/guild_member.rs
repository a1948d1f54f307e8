use serenity::all::Member;

/// A guild member as seen live from Discord.
///
/// Role possession is read from this snapshot rather than from the stored holder flag,
/// which can lag or be edited by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildMember {
    /// Discord user ID as a u64.
    pub user_id: u64,
    /// Discord username (not the guild nickname).
    pub username: String,
    /// IDs of every role the member currently holds.
    pub role_ids: Vec<u64>,
}

impl GuildMember {
    /// Builds the snapshot from a serenity member.
    pub fn from_member(member: &Member) -> Self {
        Self {
            user_id: member.user.id.get(),
            username: member.user.name.clone(),
            role_ids: member.roles.iter().map(|r| r.get()).collect(),
        }
    }

    /// Whether the member currently holds the role.
    pub fn has_role(&self, role_id: u64) -> bool {
        self.role_ids.contains(&role_id)
    }
}
