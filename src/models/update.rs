use chrono::{DateTime, FixedOffset};

use crate::models::UserSummary;
use crate::traits::Parseable;
use crate::xml::XmlNode;

/// An entry of the friends' updates feed.
#[derive(Debug, Clone, Default)]
pub struct Update {
    /// The kind of update, e.g. `review` or `userstatus`.
    pub update_type: String,
    /// What happened. May contain HTML.
    pub action_text: String,
    /// The page of the update.
    pub link: String,
    /// An image illustrating the update.
    pub image_url: String,
    /// The user the update is about.
    pub actor: Option<UserSummary>,
    /// When the update happened.
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl Parseable for Update {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.update_type = node.attribute("type").unwrap_or_default().to_string();
        self.action_text = node.element_as_string("action_text");
        self.link = node.element_as_string("link");
        self.image_url = node.element_as_string("image_url");
        self.actor = node.element_as_object("actor");
        self.updated_at = node.element_as_datetime("updated_at");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocument;

    #[test]
    fn test_parse_update() {
        let doc = XmlDocument::parse(
            r#"<GoodreadsResponse><updates>
                <update type="review">
                    <action_text><![CDATA[rated a book 5 stars]]></action_text>
                    <link>https://www.goodreads.com/review/show/1</link>
                    <actor><id>5</id><name>Ann</name></actor>
                    <updated_at>2017-01-10T12:00:00-08:00</updated_at>
                </update>
            </updates></GoodreadsResponse>"#,
        )
        .unwrap();
        let node = doc.locate("updates/update").unwrap();
        let update = Update::from_node(&node);

        assert_eq!(update.update_type, "review");
        assert_eq!(update.action_text, "rated a book 5 stars");
        assert_eq!(update.actor.unwrap().id, 5);
        assert!(update.updated_at.is_some());
    }
}
