use chrono::{DateTime, FixedOffset};

use crate::models::{GroupFolder, UserSummary};
use crate::traits::Parseable;
use crate::xml::XmlNode;

/// A discussion topic.
#[derive(Debug, Clone, Default)]
pub struct Topic {
    /// The Goodreads id of the topic.
    pub id: i64,
    /// The title of the topic.
    pub title: String,
    /// The number of comments.
    pub comments_count: i32,
    /// When the last comment was posted.
    pub last_comment_at: Option<DateTime<FixedOffset>>,
    /// When the topic was created.
    pub created_at: Option<DateTime<FixedOffset>>,
    /// When the topic was last updated.
    pub updated_at: Option<DateTime<FixedOffset>>,
    /// What the topic is about, `Book` or `Group`.
    pub subject_type: String,
    /// The id of the subject.
    pub subject_id: i64,
    /// The folder holding the topic.
    pub folder: Option<GroupFolder>,
    /// The user who started the topic.
    pub author: Option<UserSummary>,
    /// The comments of the topic, when requested.
    pub comments: Option<Vec<Comment>>,
}

impl Parseable for Topic {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.title = node.element_as_string("title");
        self.comments_count = node.element_as_i32("comments_count");
        self.last_comment_at = node.element_as_datetime("last_comment_at");
        self.created_at = node.element_as_datetime("created_at");
        self.updated_at = node.element_as_datetime("updated_at");
        self.subject_type = node.element_as_string("subject_type");
        self.subject_id = node.element_as_i64("subject_id");
        self.folder = node.element_as_object("folder");
        self.author = node.element_as_object("author_user");
        self.comments = node.element_as_list("comments", "comment");
    }
}

/// A comment on a topic.
#[derive(Debug, Clone, Default)]
pub struct Comment {
    /// The Goodreads id of the comment.
    pub id: i64,
    /// The text of the comment.
    pub body: String,
    /// When the comment was posted.
    pub created_at: Option<DateTime<FixedOffset>>,
    /// When the comment was last edited.
    pub updated_at: Option<DateTime<FixedOffset>>,
    /// The user who posted the comment.
    pub user: Option<UserSummary>,
}

impl Parseable for Comment {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.body = node.element_as_string("body");
        self.created_at = node.element_as_datetime("created_at");
        self.updated_at = node.element_as_datetime("updated_at");
        self.user = node.element_as_object("user");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::from_xml_str;

    #[test]
    fn test_parse_topic() {
        let topic: Topic = from_xml_str(
            r#"<GoodreadsResponse><topic>
                <id>12</id>
                <title>Welcome</title>
                <comments_count>2</comments_count>
                <subject_type>Group</subject_type>
                <subject_id>1</subject_id>
                <folder><id>10</id><title>General</title></folder>
                <author_user><id>3</id><name>Otis</name></author_user>
                <comments start="1" end="2" total="2">
                    <comment><id>100</id><body>hello</body><user><id>4</id><name>Ann</name></user></comment>
                    <comment><id>101</id><body>hi</body></comment>
                </comments>
            </topic></GoodreadsResponse>"#,
            "topic",
        )
        .unwrap()
        .unwrap();

        assert_eq!(topic.id, 12);
        assert_eq!(topic.subject_type, "Group");
        assert_eq!(topic.folder.unwrap().title, "General");
        assert_eq!(topic.author.unwrap().name, "Otis");

        let comments = topic.comments.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].user.as_ref().unwrap().name, "Ann");
        assert!(comments[1].user.is_none());
    }
}
