use crate::client::states::Authorized;
use crate::models::request::{UpdateFilter, UpdateType};
use crate::models::Update;
use crate::{GoodreadsClient, GrClientResult, Method, PaginatedList, Parameters};

/// The friends' updates feed.
#[derive(Debug)]
pub struct UpdatesEndpoint<'a> {
    client: &'a GoodreadsClient<Authorized>,
}

impl<'a> UpdatesEndpoint<'a> {
    pub(crate) fn new(client: &'a GoodreadsClient<Authorized>) -> Self {
        Self { client }
    }

    /// Gets the latest updates of the user's friends.
    ///
    /// A reply without updates gives an empty list.
    pub async fn friends(
        &self,
        update_type: Option<UpdateType>,
        filter: Option<UpdateFilter>,
        max_updates: Option<i32>,
    ) -> GrClientResult<Vec<Update>> {
        let parameters = Parameters::new()
            .option_opt(update_type)
            .option_opt(filter)
            .query_opt("max_updates", max_updates);
        let spec = self
            .client
            .build("updates/friends", parameters, Method::GET)
            .expect_root("updates");
        let page: PaginatedList<Update> = self.client.execute_typed(&spec).await?;
        Ok(page.list)
    }
}
