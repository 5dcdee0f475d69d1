//! Options that narrow or order a request.

use crate::query_parameter_enum;

query_parameter_enum!(
    /// The field a book search matches against.
    BookSearchField, "search[field]", {
        /// Title, author and ISBN.
        All => "all",
        /// The title only.
        Title => "title",
        /// The author only.
        Author => "author",
    }
);

query_parameter_enum!(
    /// The order of a user's group list.
    SortGroupList, "sort", {
        /// By the user's own activity.
        MyActivity => "my_activity",
        /// By the number of members.
        Members => "members",
        /// By the last activity.
        LastActivity => "last_activity",
        /// By title.
        Title => "title",
    }
);

query_parameter_enum!(
    /// The order of the topics in a group's folders.
    SortGroupInfo, "sort", {
        /// By the number of comments.
        CommentsCount => "comments_count",
        /// By title.
        Title => "title",
        /// By the last update.
        UpdatedAt => "updated_at",
        /// By the number of views.
        Views => "views",
    }
);

query_parameter_enum!(
    /// The direction of an ordering.
    OrderInfo, "order", {
        /// Ascending.
        Ascending => "a",
        /// Descending.
        Descending => "d",
    }
);

query_parameter_enum!(
    /// The order of a group's member list.
    SortGroupMember, "sort", {
        /// By the last time the member was online.
        LastOnline => "last_online",
        /// By the number of comments.
        NumComments => "num_comments",
        /// By the date the member joined.
        DateJoined => "date_joined",
        /// By the member's title.
        Title => "title",
    }
);

query_parameter_enum!(
    /// The order of the topics in a folder.
    GroupFolderSort, "sort", {
        /// By the number of comments.
        CommentsCount => "comments_count",
        /// By title.
        Title => "title",
        /// By the last update.
        UpdatedAt => "updated_at",
        /// By the number of views.
        Views => "views",
    }
);

query_parameter_enum!(
    /// What a new topic is about.
    TopicSubjectType, "topic[subject_type]", {
        /// A book.
        Book => "Book",
        /// A group.
        Group => "Group",
    }
);

query_parameter_enum!(
    /// The kind of friends' updates to fetch.
    UpdateType, "update", {
        /// Books added to shelves.
        Books => "books",
        /// Reviews.
        Reviews => "reviews",
        /// Reading statuses.
        Statuses => "statuses",
    }
);

query_parameter_enum!(
    /// Whose updates to fetch.
    UpdateFilter, "update_filter", {
        /// Friends.
        Friends => "friends",
        /// Followed users.
        Following => "following",
        /// Top friends.
        TopFriends => "top_friends",
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryParameter;

    #[test]
    fn test_option_values() {
        assert_eq!(BookSearchField::KEY, "search[field]");
        assert_eq!(BookSearchField::Author.value(), "author");
        assert_eq!(SortGroupMember::NumComments.value(), "num_comments");
        assert_eq!(TopicSubjectType::KEY, "topic[subject_type]");
        assert_eq!(TopicSubjectType::Book.value(), "Book");
        assert_eq!(UpdateFilter::TopFriends.value(), "top_friends");
        assert_eq!(OrderInfo::Descending.value(), "d");
    }
}
