use chrono::NaiveDate;

use crate::client::states::Authorized;
use crate::endpoints::expect_status;
use crate::models::{OwnedBook, OwnedBookSummary};
use crate::{GoodreadsClient, GrClientResult, Method, PaginatedList, Parameters};

/// The user's collection of owned books.
#[derive(Debug)]
pub struct OwnedBooksEndpoint<'a> {
    client: &'a GoodreadsClient<Authorized>,
}

/// A book to add to the user's collection.
#[derive(Debug, Clone, Default)]
pub struct NewOwnedBook<'o> {
    /// The id of the book.
    pub book_id: i64,
    /// The condition code, from 10 (brand new) to 60 (poor).
    pub condition_code: i32,
    /// A description of the condition.
    pub condition_description: Option<&'o str>,
    /// When the book was bought.
    pub purchase_date: Option<NaiveDate>,
    /// Where the book was bought.
    pub purchase_location: Option<&'o str>,
    /// A unique code written into the book.
    pub unique_code: Option<i32>,
}

impl<'a> OwnedBooksEndpoint<'a> {
    pub(crate) fn new(client: &'a GoodreadsClient<Authorized>) -> Self {
        Self { client }
    }

    /// Lists the books a user owns.
    pub async fn list(&self, user_id: i64, page: i32) -> GrClientResult<PaginatedList<OwnedBook>> {
        let parameters = Parameters::new().query("id", user_id).query("page", page);
        let spec = self
            .client
            .build("owned_books/user", parameters, Method::GET)
            .expect_root("owned_books");
        self.client.execute_typed(&spec).await
    }

    /// Gets an owned book record.
    pub async fn get_info(&self, owned_book_id: i64) -> GrClientResult<OwnedBook> {
        let spec = self
            .client
            .build(
                "owned_books/show/{id}",
                Parameters::new().segment("id", owned_book_id),
                Method::GET,
            )
            .expect_root("owned_book/owned_book");
        self.client.execute_typed(&spec).await
    }

    /// Adds a book to the user's collection and returns the new record.
    pub async fn add(&self, book: &NewOwnedBook<'_>) -> GrClientResult<OwnedBookSummary> {
        let parameters = Parameters::new()
            .query("owned_book[book_id]", book.book_id)
            .query("owned_book[condition_code]", book.condition_code)
            .query_opt(
                "owned_book[condition_description]",
                book.condition_description.filter(|d| !d.is_empty()),
            )
            .query_opt(
                "owned_book[original_purchase_date]",
                book.purchase_date
                    .map(|date| date.format("%Y/%m/%d").to_string()),
            )
            .query_opt(
                "owned_book[original_purchase_location]",
                book.purchase_location.filter(|l| !l.is_empty()),
            )
            .query_opt("owned_book[unique_code]", book.unique_code);
        let spec = self
            .client
            .build("owned_books", parameters, Method::POST)
            .expect_root("owned-book");
        self.client.execute_typed(&spec).await
    }

    /// Removes a book from the user's collection.
    ///
    /// Returns whether the service answered with status 204.
    pub async fn delete(&self, owned_book_id: i64) -> GrClientResult<bool> {
        let spec = self.client.build(
            "owned_books/destroy/{id}",
            Parameters::new().segment("id", owned_book_id),
            Method::POST,
        );
        let raw = self.client.execute_raw(&spec).await?;
        Ok(expect_status(&raw, 204, "owned book delete"))
    }
}
