use crate::client::states::{Anonymous, AuthState, Authorized};
use crate::models::request::{GroupFolderSort, OrderInfo, TopicSubjectType};
use crate::models::Topic;
use crate::{GoodreadsClient, GrClientResult, Method, PaginatedList, Parameters};

/// Discussion topics.
#[derive(Debug)]
pub struct TopicsEndpoint<'a, State = Anonymous> {
    client: &'a GoodreadsClient<State>,
}

/// A topic to start in a group or about a book.
#[derive(Debug, Clone)]
pub struct NewTopic<'t> {
    /// What the topic is about.
    pub subject_type: TopicSubjectType,
    /// The id of the book or group.
    pub subject_id: i64,
    /// The folder to put the topic in, the default folder if unset.
    pub folder_id: Option<i64>,
    /// The title of the topic.
    pub title: &'t str,
    /// Whether the topic is a question.
    pub is_question: bool,
    /// The opening comment.
    pub comment: &'t str,
    /// Whether to announce the topic in the user's update feed.
    pub add_to_update_feed: bool,
    /// Whether to subscribe the user to a digest of new comments.
    pub need_digest: bool,
}

impl<'a, State: AuthState> TopicsEndpoint<'a, State> {
    pub(crate) fn new(client: &'a GoodreadsClient<State>) -> Self {
        Self { client }
    }

    /// Gets a topic with its comments.
    pub async fn get_info(&self, topic_id: i64) -> GrClientResult<Topic> {
        let spec = self
            .client
            .build("topic/show", Parameters::new().query("id", topic_id), Method::GET)
            .expect_root("topic");
        self.client.execute_typed(&spec).await
    }

    /// Lists the topics of a group folder.
    pub async fn list_in_folder(
        &self,
        folder_id: i64,
        group_id: i64,
        page: i32,
        sort: GroupFolderSort,
        order: OrderInfo,
    ) -> GrClientResult<PaginatedList<Topic>> {
        let parameters = Parameters::new()
            .segment("folderId", folder_id)
            .query("group_id", group_id)
            .query("page", page)
            .option(sort)
            .option(order);
        let spec = self
            .client
            .build("topic/group_folder/{folderId}", parameters, Method::GET)
            .expect_root("group_folder/topics");
        self.client.execute_typed(&spec).await
    }
}

impl TopicsEndpoint<'_, Authorized> {
    /// Lists the topics of a group with unread comments.
    ///
    /// With `viewed`, only topics the user has looked at before are listed.
    pub async fn list_unread(
        &self,
        group_id: i64,
        viewed: bool,
        page: i32,
        sort: GroupFolderSort,
        order: OrderInfo,
    ) -> GrClientResult<PaginatedList<Topic>> {
        let parameters = Parameters::new()
            .segment("groupId", group_id)
            .query("page", page)
            .option(sort)
            .option(order)
            .query_opt("viewed", viewed.then_some(true));
        let spec = self
            .client
            .build("topic/unread_group/{groupId}", parameters, Method::GET)
            .expect_root("group_folder/topics");
        self.client.execute_typed(&spec).await
    }

    /// Starts a new topic.
    pub async fn create(&self, topic: &NewTopic<'_>) -> GrClientResult<Topic> {
        let parameters = Parameters::new()
            .option(topic.subject_type)
            .query("topic[subject_id]", topic.subject_id)
            .query("topic[title]", topic.title)
            .query("topic[question_flag]", if topic.is_question { "1" } else { "0" })
            .query("comment[body_usertext]", topic.comment)
            .query_opt("topic[folder_id]", topic.folder_id)
            .query_opt("update_feed", topic.add_to_update_feed.then_some("on"))
            .query_opt("digest", topic.need_digest.then_some("on"));
        let spec = self
            .client
            .build("topic", parameters, Method::POST)
            .expect_root("topic");
        self.client.execute_typed(&spec).await
    }
}
