use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::BookSummary;
use crate::traits::Parseable;
use crate::xml::XmlNode;

/// Aggregate information about all editions of a book.
#[derive(Debug, Clone, Default)]
pub struct Work {
    /// The Goodreads id of the work.
    pub id: i64,
    /// The number of editions.
    pub books_count: i32,
    /// The id of the most popular edition.
    pub best_book_id: i64,
    /// The most popular edition, when included.
    pub best_book: Option<BookSummary>,
    /// The number of reviews across all editions.
    pub reviews_count: i32,
    /// The sum of all ratings across all editions.
    pub ratings_sum: i32,
    /// The number of ratings across all editions.
    pub ratings_count: i32,
    /// The number of reviews with text across all editions.
    pub text_reviews_count: i32,
    /// The average rating across all editions.
    pub average_rating: f64,
    /// The date of the first publication.
    pub original_publication_date: Option<NaiveDate>,
    /// The original title.
    pub original_title: String,
    /// The language of the first publication.
    pub original_language_id: Option<i64>,
    /// The media type, e.g. `book`.
    pub media_type: String,
    /// Rating → number of ratings. The service also lists a `total` entry.
    pub rating_distribution: Option<BTreeMap<String, i32>>,
    /// The position of the work inside a series, e.g. `3` or `1-2`.
    ///
    /// Only known when the work is listed as part of a series.
    pub user_position: Option<String>,
}

impl Work {
    /// Sets the position of the work inside a series.
    pub fn set_user_position(&mut self, position: Option<String>) {
        self.user_position = position;
    }
}

impl Parseable for Work {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.books_count = node.element_as_i32("books_count");
        self.best_book = node.element_as_object("best_book");
        self.best_book_id = match &self.best_book {
            Some(best) if node.child("best_book_id").is_none() => best.id,
            _ => node.element_as_i64("best_book_id"),
        };
        self.reviews_count = node.element_as_i32("reviews_count");
        self.ratings_sum = node.element_as_i32("ratings_sum");
        self.ratings_count = node.element_as_i32("ratings_count");
        self.text_reviews_count = node.element_as_i32("text_reviews_count");
        self.average_rating = node.element_as_decimal("average_rating");
        self.original_publication_date = node.element_as_date("original_publication");
        self.original_title = node.element_as_string("original_title");
        self.original_language_id = node.element_as_opt_i64("original_language_id");
        self.media_type = node.element_as_string("media_type");
        self.rating_distribution = node
            .child("rating_dist")
            .map(|dist| parse_rating_distribution(dist.text()));
    }
}

/// Parses the `5:10|4:3|total:13` form of a rating distribution.
fn parse_rating_distribution(text: &str) -> BTreeMap<String, i32> {
    text.split('|')
        .filter_map(|entry| entry.split_once(':'))
        .filter_map(|(rating, count)| {
            count
                .trim()
                .parse()
                .ok()
                .map(|count| (rating.trim().to_string(), count))
        })
        .collect()
}
