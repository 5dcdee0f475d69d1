use std::collections::BTreeMap;

use chrono::NaiveDate;
use url::Url;

use crate::models::Work;
use crate::traits::Parseable;
use crate::xml::XmlNode;

/// A single book, as returned by the book endpoints.
#[derive(Debug, Clone, Default)]
pub struct Book {
    /// The Goodreads id of the book.
    pub id: i64,
    /// The title of the book.
    pub title: String,
    /// The description of the book. May contain HTML.
    pub description: String,
    /// The ISBN of the book.
    pub isbn: String,
    /// The ISBN13 of the book.
    pub isbn13: String,
    /// The ASIN of the book.
    pub asin: String,
    /// The Kindle ASIN of the book.
    pub kindle_asin: String,
    /// The marketplace id of the book.
    pub marketplace_id: String,
    /// The country code of the book.
    pub country_code: String,
    /// The cover image.
    pub image_url: String,
    /// The small cover image.
    pub small_image_url: String,
    /// The publication date. Missing month or day default to the first.
    pub publication_date: Option<NaiveDate>,
    /// The publisher.
    pub publisher: String,
    /// The language code.
    pub language_code: String,
    /// Whether this edition is an eBook.
    pub is_ebook: bool,
    /// The average rating of this edition.
    pub average_rating: f64,
    /// The number of pages.
    pub pages: i32,
    /// The format, e.g. `Paperback`.
    pub format: String,
    /// Brief information about this edition.
    pub edition_information: String,
    /// The number of ratings of this edition.
    pub ratings_count: i32,
    /// The number of reviews with text of this edition.
    pub text_reviews_count: i32,
    /// The Goodreads page of the book.
    pub url: String,
    /// Aggregate information across all editions.
    pub work: Option<Work>,
    /// The authors of the book.
    pub authors: Option<Vec<AuthorSummary>>,
    /// Shelf name → number of users who put the book on it.
    pub popular_shelves: Option<BTreeMap<String, i32>>,
    /// Links to libraries the book can be borrowed from.
    pub book_links: Option<Vec<BookLink>>,
    /// Links to shops the book can be bought from.
    pub buy_links: Option<Vec<BookLink>>,
    /// Books similar to this one.
    pub similar_books: Option<Vec<BookSummary>>,
}

impl Parseable for Book {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.title = node.element_as_string("title");
        self.isbn = node.element_as_string("isbn");
        self.isbn13 = node.element_as_string("isbn13");
        self.asin = node.element_as_string("asin");
        self.kindle_asin = node.element_as_string("kindle_asin");
        self.marketplace_id = node.element_as_string("marketplace_id");
        self.country_code = node.element_as_string("country_code");
        self.image_url = node.element_as_string("image_url");
        self.small_image_url = node.element_as_string("small_image_url");
        self.publication_date = node.element_as_date("publication");
        self.publisher = node.element_as_string("publisher");
        self.language_code = node.element_as_string("language_code");
        self.is_ebook = node.element_as_bool("is_ebook");
        self.description = node.element_as_string("description");
        self.average_rating = node.element_as_decimal("average_rating");
        self.pages = node.element_as_i32("num_pages");
        self.format = node.element_as_string("format");
        self.edition_information = node.element_as_string("edition_information");
        self.ratings_count = node.element_as_i32("ratings_count");
        self.text_reviews_count = node.element_as_i32("text_reviews_count");
        self.url = node.element_as_string("url");

        self.work = node.element_as_object("work");
        self.authors = node.element_as_list("authors", "author");
        self.popular_shelves = node.element_as_count_map("popular_shelves", "shelf");
        self.similar_books = node.element_as_list("similar_books", "book");

        self.book_links = node.element_as_list("book_links", "book_link");
        self.buy_links = node.element_as_list("buy_links", "buy_link");
        for link in self
            .book_links
            .iter_mut()
            .chain(self.buy_links.iter_mut())
            .flatten()
        {
            link.apply_book_id(self.id);
        }
    }
}

/// The short form of a book, as nested in other responses.
#[derive(Debug, Clone, Default)]
pub struct BookSummary {
    /// The Goodreads id of the book.
    pub id: i64,
    /// The title of the book.
    pub title: String,
    /// The title without the series suffix.
    pub title_without_series: String,
    /// The ISBN of the book.
    pub isbn: String,
    /// The ISBN13 of the book.
    pub isbn13: String,
    /// The cover image.
    pub image_url: String,
    /// The small cover image.
    pub small_image_url: String,
    /// The Goodreads page of the book.
    pub link: String,
    /// The number of pages.
    pub pages: i32,
    /// The average rating.
    pub average_rating: f64,
    /// The number of ratings.
    pub ratings_count: i32,
    /// The publication date.
    pub publication_date: Option<NaiveDate>,
    /// The authors, when listed.
    pub authors: Option<Vec<AuthorSummary>>,
    /// The single author, when given instead of a list.
    pub author: Option<AuthorSummary>,
}

impl Parseable for BookSummary {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.title = node.element_as_string("title");
        self.title_without_series = node.element_as_string("title_without_series");
        self.isbn = node.element_as_string("isbn");
        self.isbn13 = node.element_as_string("isbn13");
        self.image_url = node.element_as_string("image_url");
        self.small_image_url = node.element_as_string("small_image_url");
        self.link = node.element_as_string("link");
        self.pages = node.element_as_i32("num_pages");
        self.average_rating = node.element_as_decimal("average_rating");
        self.ratings_count = node.element_as_i32("ratings_count");
        self.publication_date = node.element_as_date("publication");
        self.authors = node.element_as_list("authors", "author");
        self.author = node.element_as_object("author");
    }
}

/// The short form of an author.
#[derive(Debug, Clone, Default)]
pub struct AuthorSummary {
    /// The Goodreads id of the author.
    pub id: i64,
    /// The name of the author.
    pub name: String,
    /// The role on the book, e.g. `Illustrator`. Empty for the main author.
    pub role: String,
    /// The profile image.
    pub image_url: String,
    /// The small profile image.
    pub small_image_url: String,
    /// The Goodreads page of the author.
    pub link: String,
    /// The average rating across the author's books.
    pub average_rating: f64,
    /// The number of ratings across the author's books.
    pub ratings_count: i32,
    /// The number of reviews with text across the author's books.
    pub text_reviews_count: i32,
}

impl Parseable for AuthorSummary {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.name = node.element_as_string("name");
        self.role = node.element_as_string("role");
        self.image_url = node.element_as_string("image_url");
        self.small_image_url = node.element_as_string("small_image_url");
        self.link = node.element_as_string("link");
        self.average_rating = node.element_as_decimal("average_rating");
        self.ratings_count = node.element_as_i32("ratings_count");
        self.text_reviews_count = node.element_as_i32("text_reviews_count");
    }
}

/// A link to a third party offering a book.
#[derive(Debug, Clone, Default)]
pub struct BookLink {
    /// The id of the link.
    pub id: i64,
    /// The name of the third party.
    pub name: String,
    /// The link. Only works once the book id has been added to it.
    pub link: String,
    /// The book the link belongs to.
    pub book_id: Option<i64>,
}

impl BookLink {
    /// Stamps the owning book onto the link.
    ///
    /// The service returns links that need the book id as a `book_id` query parameter.
    pub fn apply_book_id(&mut self, book_id: i64) {
        self.book_id = Some(book_id);
        if self.link.is_empty() {
            return;
        }

        self.link = match Url::parse(&self.link) {
            Ok(mut url) => {
                url.query_pairs_mut()
                    .append_pair("book_id", &book_id.to_string());
                url.to_string()
            }
            Err(_) => {
                let separator = if self.link.contains('?') { '&' } else { '?' };
                format!("{}{}book_id={}", self.link, separator, book_id)
            }
        };
    }
}

impl Parseable for BookLink {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.name = node.element_as_string("name");
        self.link = node.element_as_string("link");
    }
}
