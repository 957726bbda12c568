//! Member listing: filter, sort and paginate a guild's members.

use chrono::Utc;

use crate::{
    model::member::MemberListDto,
    server::{
        bot::client::BotClient,
        error::AppError,
        model::{
            discord::{Guild, Member},
            member_list::{MemberListParam, MemberPage},
        },
    },
};

pub struct MemberListService<'a> {
    bot: &'a dyn BotClient,
}

impl<'a> MemberListService<'a> {
    pub fn new(bot: &'a dyn BotClient) -> Self {
        Self { bot }
    }

    /// Lists one page of a guild's members.
    ///
    /// With `param.fetch` set the member list is refreshed from Discord first, and the
    /// refresh completes before filtering starts.
    ///
    /// # Arguments
    /// - `guild` - Guild snapshot the requester was authorized against
    /// - `param` - Validated list parameters
    ///
    /// # Returns
    /// - `Ok(MemberListDto)` - The requested page
    /// - `Err(AppError::DiscordErr)` - The refresh failed
    pub async fn list(
        &self,
        mut guild: Guild,
        param: &MemberListParam,
    ) -> Result<MemberListDto, AppError> {
        if param.fetch {
            guild.members = self.bot.fetch_members(guild.id).await?;
        }

        let page = paginate(&guild.members, param);

        Ok(page.into_dto(&guild, Utc::now()))
    }
}

/// Applies the member list steps in order: base order by id, filter, stable sort, slice.
///
/// `total` counts every member; `pageof` counts pages of the filtered set.
pub fn paginate(members: &[Member], param: &MemberListParam) -> MemberPage {
    let mut ordered: Vec<&Member> = members.iter().collect();
    ordered.sort_by_key(|member| member.id());

    let mut filtered: Vec<&Member> = ordered
        .into_iter()
        .filter(|member| {
            param
                .filter
                .as_ref()
                .map_or(true, |filter| filter.matches(member))
        })
        .collect();

    if let Some(field) = param.sort_by {
        // sort_by is stable, so ties keep id order
        filtered.sort_by(|a, b| field.compare(a, b));
    }

    MemberPage {
        total: members.len(),
        page: param.start / param.limit + 1,
        pageof: filtered.len().div_ceil(param.limit),
        members: filtered
            .into_iter()
            .skip(param.start)
            .take(param.limit)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::server::{
        bot::memory::{fixture, InMemoryBot},
        model::member_list::{FilterTarget, MemberFilter, SortField},
    };

    fn usernames(page: &MemberPage) -> Vec<&str> {
        page.members
            .iter()
            .map(|member| member.user.username.as_str())
            .collect()
    }

    fn param(filter: Option<&str>, sort_by: Option<SortField>, start: usize, limit: usize) -> MemberListParam {
        MemberListParam {
            fetch: false,
            start,
            limit,
            filter: filter.map(|filter| MemberFilter::new(filter, FilterTarget::DisplayName)),
            sort_by,
        }
    }

    #[test]
    fn filters_and_sorts_by_username() {
        let members = vec![
            fixture::member(3, "bob"),
            fixture::member(1, "alice"),
            fixture::member(2, "albert"),
        ];

        let page = paginate(&members, &param(Some("al"), Some(SortField::Username), 0, 2));

        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.pageof, 1);
        assert_eq!(usernames(&page), vec!["albert", "alice"]);
    }

    #[test]
    fn filter_is_case_insensitive_and_complete() {
        let mut members: Vec<Member> = (1..=30)
            .map(|id| fixture::member(id, &format!("user{}", id)))
            .collect();
        members[4].nickname = Some("ALPHA".to_string());
        members[9].nickname = Some("Falcon".to_string());
        members[19].user.username = "alfred".to_string();

        let page = paginate(&members, &param(Some("aL"), None, 0, 50));

        // alfred has no nickname, so the display name is the username
        let ids: Vec<u64> = page.members.iter().map(Member::id).collect();
        assert_eq!(ids, vec![5, 10, 20]);
        assert!(page
            .members
            .iter()
            .all(|member| member.display_name().to_lowercase().contains("al")));
    }

    #[test]
    fn filter_by_username_ignores_nicknames() {
        let mut members = vec![fixture::member(1, "zed"), fixture::member(2, "alice")];
        members[0].nickname = Some("Al".to_string());

        let mut by_username = param(None, None, 0, 50);
        by_username.filter = Some(MemberFilter::new("al", FilterTarget::Username));

        assert_eq!(usernames(&paginate(&members, &by_username)), vec!["alice"]);
        assert_eq!(
            usernames(&paginate(&members, &param(Some("al"), None, 0, 50))),
            vec!["zed", "alice"]
        );
    }

    #[test]
    fn consecutive_pages_partition_filtered_set() {
        let members: Vec<Member> = (1..=120)
            .rev()
            .map(|id| fixture::member(id, &format!("member{:03}", id)))
            .collect();

        let first = paginate(&members, &param(None, Some(SortField::Username), 0, 50));
        let second = paginate(&members, &param(None, Some(SortField::Username), 50, 50));
        let third = paginate(&members, &param(None, Some(SortField::Username), 100, 50));

        assert_eq!((first.page, second.page, third.page), (1, 2, 3));
        assert_eq!(first.pageof, 3);
        assert_eq!(third.members.len(), 20);

        let combined: Vec<u64> = first
            .members
            .iter()
            .chain(&second.members)
            .chain(&third.members)
            .map(Member::id)
            .collect();
        assert_eq!(combined, (1..=120).collect::<Vec<u64>>());
    }

    #[test]
    fn missing_join_dates_sort_first_and_ties_keep_id_order() {
        let joined = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let members = vec![
            fixture::joined(fixture::member(4, "d"), joined),
            fixture::member(3, "c"),
            fixture::joined(fixture::member(2, "b"), joined),
            fixture::member(1, "a"),
        ];

        let page = paginate(&members, &param(None, Some(SortField::JoinedAt), 0, 50));
        let ids: Vec<u64> = page.members.iter().map(Member::id).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);
    }

    #[test]
    fn start_past_end_yields_empty_page() {
        let members = vec![fixture::member(1, "a"), fixture::member(2, "b")];
        let page = paginate(&members, &param(None, None, 10, 5));

        assert!(page.members.is_empty());
        assert_eq!(page.page, 3);
        assert_eq!(page.pageof, 1);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn fetch_refreshes_members_before_filtering() -> Result<(), AppError> {
        let guild = fixture::guild(1000, "Guild", 1, vec![fixture::member(1, "alice")]);
        let bot = InMemoryBot::new().with_guild(guild.clone()).with_refreshed_members(
            1000,
            vec![fixture::member(1, "alice"), fixture::member(2, "alvin")],
        );

        let service = MemberListService::new(&bot);

        let cached = service.list(guild.clone(), &param(Some("al"), None, 0, 50)).await?;
        assert_eq!(cached.total, 1);
        assert!(bot.fetched().is_empty());

        let mut refresh = param(Some("al"), None, 0, 50);
        refresh.fetch = true;
        let fetched = service.list(guild, &refresh).await?;

        assert_eq!(bot.fetched(), vec![1000]);
        assert_eq!(fetched.total, 2);
        assert_eq!(fetched.members[1].username, "alvin");

        Ok(())
    }
}
