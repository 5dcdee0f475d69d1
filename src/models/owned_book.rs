use chrono::{DateTime, FixedOffset};

use crate::models::BookSummary;
use crate::traits::Parseable;
use crate::xml::XmlNode;

/// A book in a user's collection of owned books.
#[derive(Debug, Clone, Default)]
pub struct OwnedBook {
    /// The id of the owned book record.
    pub id: i64,
    /// The user owning the book.
    pub owner_id: i64,
    /// When the book was bought.
    pub original_purchase_date: Option<DateTime<FixedOffset>>,
    /// Where the book was bought.
    pub original_purchase_location: String,
    /// The condition of the book, e.g. `like new`.
    pub condition: String,
    /// How often the book has changed hands.
    pub traded_count: i32,
    /// A unique code written into the book.
    pub unique_code: String,
    /// The book.
    pub book: Option<BookSummary>,
}

impl Parseable for OwnedBook {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.owner_id = node.element_as_i64("owner_id");
        self.original_purchase_date = node.element_as_datetime("original_purchase_date");
        self.original_purchase_location = node.element_as_string("original_purchase_location");
        self.condition = node.element_as_string("condition");
        self.traded_count = node.element_as_i32("traded_count");
        self.unique_code = node.element_as_string("unique_code");
        self.book = node.element_as_object("book");
    }
}

/// The owned book record as echoed back after adding a book.
///
/// Unlike the other responses, this one uses hyphenated element names.
#[derive(Debug, Clone, Default)]
pub struct OwnedBookSummary {
    /// The id of the owned book record.
    pub id: i64,
    /// The id of the book.
    pub book_id: i64,
    /// The user owning the book.
    pub user_id: i64,
    /// The condition code.
    pub condition_code: Option<i64>,
    /// A description of the condition.
    pub condition_description: String,
    /// When the book was bought.
    pub original_purchase_date: Option<DateTime<FixedOffset>>,
    /// Where the book was bought.
    pub original_purchase_location: String,
    /// A unique code written into the book.
    pub unique_code: String,
    /// When the record was created.
    pub created_at: Option<DateTime<FixedOffset>>,
    /// When the record was last updated.
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl Parseable for OwnedBookSummary {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.book_id = node.element_as_i64("book-id");
        self.user_id = node.element_as_i64("user-id");
        self.condition_code = node.element_as_opt_i64("condition-code");
        self.condition_description = node.element_as_string("condition-description");
        self.original_purchase_date = node.element_as_datetime("original-purchase-date");
        self.original_purchase_location = node.element_as_string("original-purchase-location");
        self.unique_code = node.element_as_string("unique-code");
        self.created_at = node.element_as_datetime("created-at");
        self.updated_at = node.element_as_datetime("updated-at");
    }
}
