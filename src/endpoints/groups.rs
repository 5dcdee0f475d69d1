use crate::client::states::{Anonymous, AuthState, Authorized};
use crate::endpoints::expect_status;
use crate::models::request::{OrderInfo, SortGroupInfo, SortGroupList, SortGroupMember};
use crate::models::{Group, GroupSummary, GroupUser};
use crate::{GoodreadsClient, GrClientResult, Method, PaginatedList, Parameters};

/// Group lookups.
#[derive(Debug)]
pub struct GroupsEndpoint<'a, State = Anonymous> {
    client: &'a GoodreadsClient<State>,
}

impl<'a, State: AuthState> GroupsEndpoint<'a, State> {
    pub(crate) fn new(client: &'a GoodreadsClient<State>) -> Self {
        Self { client }
    }

    /// Lists the groups a user is a member of.
    pub async fn list_by_user(
        &self,
        user_id: i64,
        sort: Option<SortGroupList>,
    ) -> GrClientResult<PaginatedList<GroupSummary>> {
        let parameters = Parameters::new()
            .segment("userId", user_id)
            .option_opt(sort);
        let spec = self
            .client
            .build("group/list/{userId}", parameters, Method::GET)
            .expect_root("groups/list");
        self.client.execute_typed(&spec).await
    }

    /// Searches groups by title and description.
    pub async fn search(
        &self,
        query: &str,
        page: i32,
    ) -> GrClientResult<PaginatedList<GroupSummary>> {
        let parameters = Parameters::new().query("q", query).query("page", page);
        let spec = self
            .client
            .build("group/search", parameters, Method::GET)
            .expect_root("groups/list");
        self.client.execute_typed(&spec).await
    }

    /// Gets a group with its folders and moderators.
    pub async fn get_info(
        &self,
        group_id: i64,
        sort: Option<SortGroupInfo>,
        order: Option<OrderInfo>,
    ) -> GrClientResult<Group> {
        let parameters = Parameters::new()
            .segment("groupId", group_id)
            .option_opt(sort)
            .option_opt(order);
        let spec = self
            .client
            .build("group/show/{groupId}", parameters, Method::GET)
            .expect_root("group");
        self.client.execute_typed(&spec).await
    }

    /// Lists the members of a group, optionally only those matching `names`.
    pub async fn members(
        &self,
        group_id: i64,
        names: &[&str],
        page: i32,
        sort: SortGroupMember,
    ) -> GrClientResult<PaginatedList<GroupUser>> {
        let names = Some(names.join(" ")).filter(|n| !n.is_empty());
        let parameters = Parameters::new()
            .segment("groupId", group_id)
            .query("page", page)
            .option(sort)
            .query_opt("q", names);
        let spec = self
            .client
            .build("group/members/{groupId}", parameters, Method::GET)
            .expect_root("group_users");
        self.client.execute_typed(&spec).await
    }
}

impl GroupsEndpoint<'_, Authorized> {
    /// Joins a group on behalf of the user.
    ///
    /// Returns whether the service answered with status 200.
    pub async fn join(&self, group_id: i64) -> GrClientResult<bool> {
        let spec = self.client.build(
            "group/join",
            Parameters::new().query("id", group_id),
            Method::POST,
        );
        let raw = self.client.execute_raw(&spec).await?;
        Ok(expect_status(&raw, 200, "group join"))
    }
}
