//! Member list query parameters and results.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    model::member::{HighestRoleDto, MemberListDto, MemberRoleDto, MemberSummaryDto},
    server::{
        error::AppError,
        model::discord::{Guild, Member},
        util::duration::format_member_for,
    },
};

/// Page size used when `limit` is missing, unparsable or zero.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Raw query string of `/dashboard/{guild_id}/members/list`.
#[derive(Debug, Default, Deserialize)]
pub struct MemberListQuery {
    pub fetch: Option<String>,
    pub start: Option<String>,
    pub limit: Option<String>,
    pub filter: Option<String>,
    #[serde(rename = "filterUser")]
    pub filter_user: Option<String>,
    pub sortby: Option<String>,
}

/// Field the member list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Username,
    DisplayName,
    Tag,
    JoinedAt,
    CreatedAt,
    Status,
    Bot,
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "id" => Ok(Self::Id),
            "username" => Ok(Self::Username),
            "displayName" => Ok(Self::DisplayName),
            "tag" => Ok(Self::Tag),
            "joinedAt" => Ok(Self::JoinedAt),
            "createdAt" => Ok(Self::CreatedAt),
            "status" => Ok(Self::Status),
            "bot" => Ok(Self::Bot),
            other => Err(AppError::BadRequest(format!(
                "Unknown sort field '{}'",
                other
            ))),
        }
    }
}

impl SortField {
    /// Ascending order of two members on this field.
    ///
    /// Strings compare case-insensitively and a missing join date sorts first.
    pub fn compare(&self, a: &Member, b: &Member) -> Ordering {
        match self {
            Self::Id => a.id().cmp(&b.id()),
            Self::Username => caseless(&a.user.username, &b.user.username),
            Self::DisplayName => caseless(a.display_name(), b.display_name()),
            Self::Tag => caseless(&a.user.tag(), &b.user.tag()),
            Self::JoinedAt => a.joined_at.cmp(&b.joined_at),
            Self::CreatedAt => a.user.created_at_ms().cmp(&b.user.created_at_ms()),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
            Self::Bot => a.user.bot.cmp(&b.user.bot),
        }
    }
}

fn caseless(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Which name a member filter matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTarget {
    /// Guild display name (nickname, global name or username).
    DisplayName,
    /// Account username.
    Username,
}

/// Case-insensitive substring filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFilter {
    /// Lowercased search text.
    pub needle: String,
    pub target: FilterTarget,
}

impl MemberFilter {
    pub fn new(needle: &str, target: FilterTarget) -> Self {
        Self {
            needle: needle.to_lowercase(),
            target,
        }
    }

    pub fn matches(&self, member: &Member) -> bool {
        let haystack = match self.target {
            FilterTarget::DisplayName => member.display_name(),
            FilterTarget::Username => member.user.username.as_str(),
        };
        haystack.to_lowercase().contains(&self.needle)
    }
}

/// Validated member list parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberListParam {
    /// Refresh the full member list from Discord before filtering.
    pub fetch: bool,
    pub start: usize,
    pub limit: usize,
    pub filter: Option<MemberFilter>,
    pub sort_by: Option<SortField>,
}

impl Default for MemberListParam {
    fn default() -> Self {
        Self {
            fetch: false,
            start: 0,
            limit: DEFAULT_PAGE_LIMIT,
            filter: None,
            sort_by: None,
        }
    }
}

impl TryFrom<MemberListQuery> for MemberListParam {
    type Error = AppError;

    /// Applies the query defaults.
    ///
    /// - `fetch`/`filterUser` are set when present and non-empty
    /// - `start` falls back to 0 and `limit` to 50 when missing or unparsable
    /// - numbers parse whole, so trailing characters as in `10abc` make the value unparsable
    /// - a `filter` of `null` or empty means no filter
    /// - an unknown `sortby` is rejected with `AppError::BadRequest`
    fn try_from(query: MemberListQuery) -> Result<Self, Self::Error> {
        let start = parse_count(query.start.as_deref()).unwrap_or(0);
        let limit = parse_count(query.limit.as_deref())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT);

        let target = if is_set(query.filter_user.as_deref()) {
            FilterTarget::Username
        } else {
            FilterTarget::DisplayName
        };
        let filter = query
            .filter
            .as_deref()
            .filter(|filter| !filter.is_empty() && *filter != "null")
            .map(|filter| MemberFilter::new(filter, target));

        let sort_by = query
            .sortby
            .as_deref()
            .filter(|sortby| !sortby.is_empty())
            .map(SortField::from_str)
            .transpose()?;

        Ok(Self {
            fetch: is_set(query.fetch.as_deref()),
            start,
            limit,
            filter,
            sort_by,
        })
    }
}

fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}

fn parse_count(value: Option<&str>) -> Option<usize> {
    value.and_then(|value| value.trim().parse::<usize>().ok())
}

/// One page of filtered, sorted members.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberPage {
    pub total: usize,
    pub page: usize,
    pub pageof: usize,
    pub members: Vec<Member>,
}

impl MemberPage {
    /// Shapes the page for the JSON response, resolving roles against `guild`.
    ///
    /// # Arguments
    /// - `guild` - Guild snapshot providing role names and colours
    /// - `now` - Reference time for the "member for" duration
    pub fn into_dto(self, guild: &Guild, now: DateTime<Utc>) -> MemberListDto {
        MemberListDto {
            total: self.total,
            page: self.page,
            pageof: self.pageof,
            members: self
                .members
                .iter()
                .map(|member| member_summary(guild, member, now))
                .collect(),
        }
    }
}

fn member_summary(guild: &Guild, member: &Member, now: DateTime<Utc>) -> MemberSummaryDto {
    let highest_role_color = guild
        .highest_role(member)
        .map(|role| role.hex_color())
        .unwrap_or_else(|| "#000000".to_string());

    MemberSummaryDto {
        id: member.id().to_string(),
        status: member.status.as_str().to_string(),
        bot: member.user.bot,
        username: member.user.username.clone(),
        display_name: member.display_name().to_string(),
        tag: member.user.tag(),
        discriminator: member.user.discriminator(),
        joined_at: member.joined_at_ms(),
        created_at: member.user.created_at_ms(),
        highest_role: HighestRoleDto {
            hex_color: highest_role_color,
        },
        member_for: member
            .joined_at
            .map(|joined_at| format_member_for(now.signed_duration_since(joined_at)))
            .unwrap_or_default(),
        roles: guild
            .member_roles(member)
            .into_iter()
            .map(|role| MemberRoleDto {
                name: role.name.clone(),
                id: role.id.to_string(),
                hex_color: role.hex_color(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> MemberListQuery {
        let mut query = MemberListQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "fetch" => query.fetch = value,
                "start" => query.start = value,
                "limit" => query.limit = value,
                "filter" => query.filter = value,
                "filterUser" => query.filter_user = value,
                "sortby" => query.sortby = value,
                _ => unreachable!(),
            }
        }
        query
    }

    #[test]
    fn applies_defaults() {
        let param = MemberListParam::try_from(query(&[])).unwrap();
        assert_eq!(param, MemberListParam::default());
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let param =
            MemberListParam::try_from(query(&[("start", "abc"), ("limit", "0")])).unwrap();
        assert_eq!(param.start, 0);
        assert_eq!(param.limit, DEFAULT_PAGE_LIMIT);

        let param = MemberListParam::try_from(query(&[("start", "-5"), ("limit", "x")])).unwrap();
        assert_eq!(param.start, 0);
        assert_eq!(param.limit, DEFAULT_PAGE_LIMIT);

        let param =
            MemberListParam::try_from(query(&[("start", "10abc"), ("limit", "20px")])).unwrap();
        assert_eq!(param.start, 0);
        assert_eq!(param.limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn null_filter_is_ignored() {
        let param = MemberListParam::try_from(query(&[("filter", "null")])).unwrap();
        assert_eq!(param.filter, None);
    }

    #[test]
    fn filter_user_switches_target() {
        let param =
            MemberListParam::try_from(query(&[("filter", "AL"), ("filterUser", "1")])).unwrap();
        assert_eq!(
            param.filter,
            Some(MemberFilter {
                needle: "al".to_string(),
                target: FilterTarget::Username,
            })
        );
    }

    #[test]
    fn parses_known_sort_fields_and_rejects_others() {
        let param = MemberListParam::try_from(query(&[("sortby", "joinedAt")])).unwrap();
        assert_eq!(param.sort_by, Some(SortField::JoinedAt));

        let result = MemberListParam::try_from(query(&[("sortby", "nickname")]));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn empty_fetch_is_not_set() {
        assert!(!MemberListParam::try_from(query(&[("fetch", "")])).unwrap().fetch);
        assert!(MemberListParam::try_from(query(&[("fetch", "true")])).unwrap().fetch);
    }
}
