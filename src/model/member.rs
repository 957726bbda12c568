use serde::{Deserialize, Serialize};

/// One page of the member list returned by `/dashboard/{guild_id}/members/list`.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct MemberListDto {
    /// Member count of the guild before filtering.
    pub total: usize,
    /// 1-based page number derived from `start / limit`.
    pub page: usize,
    /// Number of pages in the filtered set.
    pub pageof: usize,
    pub members: Vec<MemberSummaryDto>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummaryDto {
    pub id: String,
    pub status: String,
    pub bot: bool,
    pub username: String,
    pub display_name: String,
    pub tag: String,
    pub discriminator: String,
    /// Unix milliseconds, `None` when Discord did not report a join date.
    pub joined_at: Option<i64>,
    /// Unix milliseconds derived from the user snowflake.
    pub created_at: i64,
    pub highest_role: HighestRoleDto,
    pub member_for: String,
    pub roles: Vec<MemberRoleDto>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HighestRoleDto {
    pub hex_color: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MemberRoleDto {
    pub name: String,
    pub id: String,
    pub hex_color: String,
}
