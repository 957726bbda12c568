use chrono::{DateTime, Utc};
use serenity::all::Permissions;

use super::{snowflake_timestamp_ms, Channel, ChannelKind, Member, Role};

/// A guild snapshot taken from the bot cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Guild {
    pub id: u64,
    pub name: String,
    pub icon_url: Option<String>,
    pub owner_id: u64,
    /// Member count reported by Discord; may exceed `members.len()` for large guilds.
    pub member_count: u64,
    pub roles: Vec<Role>,
    pub channels: Vec<Channel>,
    pub members: Vec<Member>,
}

impl Guild {
    pub fn member(&self, user_id: u64) -> Option<&Member> {
        self.members.iter().find(|member| member.id() == user_id)
    }

    /// The `@everyone` role, which shares the guild's id.
    pub fn everyone_role(&self) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == self.id)
    }

    /// Roles assigned to `member`, highest position first, excluding `@everyone`.
    pub fn member_roles(&self, member: &Member) -> Vec<&Role> {
        let mut roles: Vec<&Role> = self
            .roles
            .iter()
            .filter(|role| role.id != self.id && member.role_ids.contains(&role.id))
            .collect();
        roles.sort_by(|a, b| b.position.cmp(&a.position).then(a.id.cmp(&b.id)));
        roles
    }

    /// Highest positioned role of `member`, falling back to `@everyone`.
    pub fn highest_role(&self, member: &Member) -> Option<&Role> {
        self.member_roles(member)
            .into_iter()
            .next()
            .or_else(|| self.everyone_role())
    }

    /// Guild-level permissions of `member`, ignoring channel overwrites.
    ///
    /// The owner and holders of `ADMINISTRATOR` receive every permission.
    pub fn member_permissions(&self, member: &Member) -> Permissions {
        if member.id() == self.owner_id {
            return Permissions::all();
        }

        let mut permissions = self
            .everyone_role()
            .map(|role| role.permissions)
            .unwrap_or_else(Permissions::empty);

        for role in self.member_roles(member) {
            permissions |= role.permissions;
        }

        if permissions.contains(Permissions::ADMINISTRATOR) {
            return Permissions::all();
        }

        permissions
    }

    /// Whether the user may manage this guild, or `None` if the bot has not cached them.
    pub fn can_manage(&self, user_id: u64) -> Option<bool> {
        self.member(user_id)
            .map(|member| has_manage_permission(self.member_permissions(member)))
    }

    pub fn channel_count(&self, kind: ChannelKind) -> usize {
        self.channels
            .iter()
            .filter(|channel| channel.kind == kind)
            .count()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(snowflake_timestamp_ms(self.id))
    }
}

/// Whether a permission set grants guild management.
pub fn has_manage_permission(permissions: Permissions) -> bool {
    permissions.intersects(Permissions::ADMINISTRATOR | Permissions::MANAGE_GUILD)
}
