use crate::client::states::{Anonymous, AuthState};
use crate::models::{Series, SeriesWork};
use crate::{GoodreadsClient, GrClientResult, Method, PaginatedList, Parameters};

/// Series lookups.
#[derive(Debug)]
pub struct SeriesEndpoint<'a, State = Anonymous> {
    client: &'a GoodreadsClient<State>,
}

impl<'a, State: AuthState> SeriesEndpoint<'a, State> {
    pub(crate) fn new(client: &'a GoodreadsClient<State>) -> Self {
        Self { client }
    }

    /// Gets a series with its works.
    pub async fn get_by_id(&self, series_id: i64) -> GrClientResult<Series> {
        let spec = self
            .client
            .build(
                "series/show/{seriesId}.xml",
                Parameters::new().segment("seriesId", series_id),
                Method::GET,
            )
            .expect_root("series");
        self.client.execute_typed(&spec).await
    }

    /// Lists the series a work belongs to.
    pub async fn list_by_work(&self, work_id: i64) -> GrClientResult<Vec<SeriesWork>> {
        self.list(
            "series/work/{workId}",
            Parameters::new().segment("workId", work_id),
        )
        .await
    }

    /// Lists the series an author has written in.
    pub async fn list_by_author(&self, author_id: i64) -> GrClientResult<Vec<SeriesWork>> {
        self.list(
            "series/list/{authorId}.xml",
            Parameters::new().segment("authorId", author_id),
        )
        .await
    }

    async fn list(&self, template: &str, parameters: Parameters) -> GrClientResult<Vec<SeriesWork>> {
        let spec = self
            .client
            .build(template, parameters, Method::GET)
            .expect_root("series_works");
        let page: PaginatedList<SeriesWork> = self.client.execute_typed(&spec).await?;
        Ok(page.list)
    }
}
