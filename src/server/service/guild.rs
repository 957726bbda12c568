//! Guild access checks and page data.

use crate::server::{
    bot::client::BotClient,
    error::{auth::AuthError, AppError},
    model::{
        discord::{Channel, ChannelKind, Guild},
        user::{AuthUser, UserGuild},
    },
    util::parse::parse_snowflake,
};

/// Channels shown under one heading of the channel page.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelGroup {
    /// Category channel, `None` for channels outside any category.
    pub category: Option<Channel>,
    pub channels: Vec<Channel>,
}

impl ChannelGroup {
    pub fn name(&self) -> &str {
        self.category
            .as_ref()
            .map(|category| category.name.as_str())
            .unwrap_or("No category")
    }
}

/// An entry of the user's `/dashboard` guild list.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardGuild {
    pub guild: UserGuild,
    /// Whether the bot is in the guild; otherwise the entry links to an invite.
    pub bot_present: bool,
}

pub struct GuildService<'a> {
    bot: &'a dyn BotClient,
}

impl<'a> GuildService<'a> {
    pub fn new(bot: &'a dyn BotClient) -> Self {
        Self { bot }
    }

    /// Resolves a guild from a path id and checks that `user` may manage it.
    ///
    /// Management requires ownership, `ADMINISTRATOR` or `MANAGE_GUILD` as computed from the
    /// bot's view of the member. Members the bot has not cached fall back to the permission
    /// bits from the user's OAuth guild list. Global admins bypass the check.
    ///
    /// # Arguments
    /// - `guild_id` - Raw path segment
    /// - `user` - Authenticated user
    /// - `is_admin` - Global admin flag from the session
    ///
    /// # Returns
    /// - `Ok(Guild)` - Snapshot of the guild
    /// - `Err(AppError::NotFound)` - Id is not a snowflake or the bot is not in the guild
    /// - `Err(AppError::AuthErr(AccessDenied))` - User may not manage the guild
    pub fn authorize(
        &self,
        guild_id: &str,
        user: &AuthUser,
        is_admin: bool,
    ) -> Result<Guild, AppError> {
        let guild = parse_snowflake(guild_id)
            .and_then(|id| self.bot.guild(id))
            .ok_or_else(|| AppError::NotFound(format!("Guild {} not found", guild_id)))?;

        let can_manage = guild.can_manage(user.id).unwrap_or_else(|| {
            user.guild(guild.id)
                .is_some_and(|user_guild| user_guild.can_manage())
        });

        if !can_manage && !is_admin {
            return Err(AuthError::AccessDenied(user.id, guild.id).into());
        }

        Ok(guild)
    }

    /// The user's OAuth guilds where they hold manage permission, by name.
    pub fn manageable_guilds(&self, user: &AuthUser) -> Vec<DashboardGuild> {
        let mut guilds: Vec<DashboardGuild> = user
            .manageable_guilds()
            .map(|guild| DashboardGuild {
                bot_present: self.bot.guild(guild.id).is_some(),
                guild: guild.clone(),
            })
            .collect();
        guilds.sort_by(|a, b| a.guild.name.to_lowercase().cmp(&b.guild.name.to_lowercase()));
        guilds
    }

    /// Makes the bot leave an authorized guild.
    pub async fn leave(&self, guild: &Guild) -> Result<(), AppError> {
        self.bot.leave_guild(guild.id).await?;

        tracing::info!("Left guild {} ({})", guild.name, guild.id);

        Ok(())
    }
}

/// Groups channels under their categories.
///
/// Categories and the channels inside each are ordered by position, then id. Channels
/// outside any category, or whose category is missing, form a leading "No category" group.
pub fn channel_tree(guild: &Guild) -> Vec<ChannelGroup> {
    let by_position = |a: &Channel, b: &Channel| a.position.cmp(&b.position).then(a.id.cmp(&b.id));

    let mut categories: Vec<Channel> = guild
        .channels
        .iter()
        .filter(|channel| channel.kind == ChannelKind::Category)
        .cloned()
        .collect();
    categories.sort_by(by_position);

    let mut uncategorized = ChannelGroup {
        category: None,
        channels: Vec::new(),
    };
    let mut groups: Vec<ChannelGroup> = categories
        .into_iter()
        .map(|category| ChannelGroup {
            category: Some(category),
            channels: Vec::new(),
        })
        .collect();

    for channel in guild
        .channels
        .iter()
        .filter(|channel| channel.kind != ChannelKind::Category)
    {
        let parent = groups.iter_mut().find(|group| {
            group.category.as_ref().map(|category| category.id) == channel.parent_id
                && channel.parent_id.is_some()
        });
        match parent {
            Some(group) => group.channels.push(channel.clone()),
            None => uncategorized.channels.push(channel.clone()),
        }
    }

    for group in &mut groups {
        group.channels.sort_by(by_position);
    }
    uncategorized.channels.sort_by(by_position);

    if !uncategorized.channels.is_empty() {
        groups.insert(0, uncategorized);
    }

    groups
}
