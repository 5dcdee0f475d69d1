use chrono::{DateTime, FixedOffset};

use crate::traits::Parseable;
use crate::xml::XmlNode;

/// A group with its folders and moderators.
#[derive(Debug, Clone, Default)]
pub struct Group {
    /// The Goodreads id of the group.
    pub id: i64,
    /// The title of the group.
    pub title: String,
    /// The access level, e.g. `public`.
    pub access: String,
    /// Where the group is located.
    pub location: String,
    /// The number of members.
    pub users_count: i32,
    /// The group image.
    pub image_url: String,
    /// The category of the group.
    pub category: String,
    /// The subcategory of the group.
    pub subcategory: String,
    /// The description of the group.
    pub description: String,
    /// The rules of the group.
    pub rules: String,
    /// Whether the group is publicly visible.
    pub is_public: bool,
    /// Whether only members may see the discussion boards.
    pub display_folder_count: bool,
    /// When the group was last active.
    pub last_activity_at: Option<DateTime<FixedOffset>>,
    /// The discussion folders.
    pub folders: Option<Vec<GroupFolder>>,
    /// The moderators.
    pub moderators: Option<Vec<GroupUser>>,
}

impl Parseable for Group {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.title = node.element_as_string("title");
        self.access = node.element_as_string("access");
        self.location = node.element_as_string("location");
        self.users_count = node.element_as_i32("users_count");
        self.image_url = node.element_as_string("image_url");
        self.category = node.element_as_string("category");
        self.subcategory = node.element_as_string("subcategory");
        self.description = node.element_as_string("description");
        self.rules = node.element_as_string("rules");
        self.is_public = node.element_as_bool("is_public");
        self.display_folder_count = node.element_as_bool("display_folder_count");
        self.last_activity_at = node.element_as_datetime("last_activity_at");
        self.folders = node.element_as_list("folders", "folder");
        self.moderators = node.element_as_list("moderators", "group_user");
    }
}

/// The short form of a group, as listed by searches.
#[derive(Debug, Clone, Default)]
pub struct GroupSummary {
    /// The Goodreads id of the group.
    pub id: i64,
    /// The title of the group.
    pub title: String,
    /// The access level.
    pub access: String,
    /// The number of members.
    pub users_count: i32,
    /// The group image.
    pub image_url: String,
    /// When the group was last active.
    pub last_activity_at: Option<DateTime<FixedOffset>>,
}

impl Parseable for GroupSummary {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.title = node.element_as_string("title");
        self.access = node.element_as_string("access");
        self.users_count = node.element_as_i32("users_count");
        self.image_url = node.element_as_string("image_url");
        self.last_activity_at = node.element_as_datetime("last_activity_at");
    }
}

/// A discussion folder of a group.
#[derive(Debug, Clone, Default)]
pub struct GroupFolder {
    /// The Goodreads id of the folder.
    pub id: i64,
    /// The title of the folder.
    pub title: String,
    /// The number of topics.
    pub items_count: i32,
    /// The number of comments.
    pub sub_count: i32,
    /// When the folder was last updated.
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl Parseable for GroupFolder {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.title = node.element_as_string("title");
        self.items_count = node.element_as_i32("items_count");
        self.sub_count = node.element_as_i32("sub_count");
        self.updated_at = node.element_as_datetime("updated_at");
    }
}

/// A member of a group.
#[derive(Debug, Clone, Default)]
pub struct GroupUser {
    /// The title the member holds inside the group.
    pub title: String,
    /// The number of comments posted.
    pub comments_count: i32,
    /// When the member last commented.
    pub last_comment_at: Option<DateTime<FixedOffset>>,
    /// When the member joined.
    pub created_at: Option<DateTime<FixedOffset>>,
    /// The user.
    pub user: Option<UserSummary>,
}

impl Parseable for GroupUser {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.title = node.element_as_string("title");
        self.comments_count = node.element_as_i32("comments_count");
        self.last_comment_at = node.element_as_datetime("last_comment_at");
        self.created_at = node.element_as_datetime("created_at");
        self.user = node.element_as_object("user");
    }
}

/// The short form of a user.
#[derive(Debug, Clone, Default)]
pub struct UserSummary {
    /// The Goodreads id of the user.
    pub id: i64,
    /// The display name of the user.
    pub name: String,
    /// The profile page.
    pub link: String,
    /// The profile image.
    pub image_url: String,
    /// The small profile image.
    pub small_image_url: String,
}

impl Parseable for UserSummary {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.name = node
            .element_as_opt_string("name")
            .or_else(|| node.element_as_opt_string("display_name"))
            .or_else(|| node.element_as_opt_string("first_name"))
            .unwrap_or_default();
        self.link = node.element_as_string("link");
        self.image_url = node.element_as_string("image_url");
        self.small_image_url = node.element_as_string("small_image_url");
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;
    use crate::responses::PaginatedList;
    use crate::xml::from_xml_str;

    #[test]
    fn test_parse_group() {
        let group: Group = from_xml_str(
            r#"<GoodreadsResponse><group>
                <id>1</id>
                <title>Goodreads Feedback</title>
                <access>public</access>
                <users_count>11000</users_count>
                <is_public>true</is_public>
                <last_activity_at>Tue Jan 10 12:00:00 -0800 2017</last_activity_at>
                <folders>
                    <folder><id>10</id><title>General</title><items_count>5</items_count></folder>
                    <folder><id>11</id><title>Bugs</title></folder>
                </folders>
                <moderators>
                    <group_user>
                        <title>moderator</title>
                        <user><id>3</id><first_name>Otis</first_name></user>
                    </group_user>
                </moderators>
            </group></GoodreadsResponse>"#,
            "group",
        )
        .unwrap()
        .unwrap();

        assert_eq!(group.id, 1);
        assert_eq!(group.access, "public");
        assert!(group.is_public);
        assert_eq!(group.last_activity_at.unwrap().year(), 2017);

        let folders = group.folders.unwrap();
        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0].items_count, 5);
        assert_eq!(folders[1].title, "Bugs");

        let moderators = group.moderators.unwrap();
        assert_eq!(moderators[0].title, "moderator");
        assert_eq!(moderators[0].user.as_ref().unwrap().name, "Otis");
    }

    #[test]
    fn test_parse_group_listing() {
        let page: PaginatedList<GroupSummary> = from_xml_str(
            r#"<GoodreadsResponse><groups>
                <list start="1" end="2" total="2">
                    <group><id>1</id><title>One</title></group>
                    <group><id>2</id><title>Two</title></group>
                </list>
            </groups></GoodreadsResponse>"#,
            "groups/list",
        )
        .unwrap()
        .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(
            page.list.iter().map(|g| g.title.as_str()).collect::<Vec<_>>(),
            vec!["One", "Two"]
        );
    }
}
