use crate::client::states::{Anonymous, AuthState};
use crate::models::request::BookSearchField;
use crate::models::{Book, ReviewStats, ReviewStatsContainer, Work};
use crate::xml::XmlDocument;
use crate::{GoodreadsClient, GrClientResult, Method, PaginatedList, Parameters};

/// Book lookups and searches.
#[derive(Debug)]
pub struct BooksEndpoint<'a, State = Anonymous> {
    client: &'a GoodreadsClient<State>,
}

impl<'a, State: AuthState> BooksEndpoint<'a, State> {
    pub(crate) fn new(client: &'a GoodreadsClient<State>) -> Self {
        Self { client }
    }

    /// Gets a book by its ISBN.
    pub async fn get_by_isbn(&self, isbn: &str) -> GrClientResult<Book> {
        let spec = self
            .client
            .build(
                "book/isbn/{isbn}.xml",
                Parameters::new().segment("isbn", isbn),
                Method::GET,
            )
            .expect_root("book");
        self.client.execute_typed(&spec).await
    }

    /// Gets a book by its Goodreads id.
    pub async fn get_by_id(&self, book_id: i64) -> GrClientResult<Book> {
        let spec = self
            .client
            .build(
                "book/show/{bookId}.xml",
                Parameters::new().segment("bookId", book_id),
                Method::GET,
            )
            .expect_root("book");
        self.client.execute_typed(&spec).await
    }

    /// Gets the best match for a title, optionally narrowed by author and rating.
    pub async fn get_by_title(
        &self,
        title: &str,
        author: Option<&str>,
        rating: Option<i32>,
    ) -> GrClientResult<Book> {
        let parameters = Parameters::new()
            .query("title", title)
            .query_opt("author", author.filter(|a| !a.is_empty()))
            .query_opt("rating", rating);
        let spec = self
            .client
            .build("book/title.xml", parameters, Method::GET)
            .expect_root("book");
        self.client.execute_typed(&spec).await
    }

    /// Lists the books of an author.
    pub async fn list_by_author(
        &self,
        author_id: i64,
        page: i32,
    ) -> GrClientResult<PaginatedList<Book>> {
        let parameters = Parameters::new()
            .segment("authorId", author_id)
            .query("page", page);
        let spec = self
            .client
            .build("author/list/{authorId}", parameters, Method::GET)
            .expect_root("author/books");
        self.client.execute_typed(&spec).await
    }

    /// Searches for works by title, author or ISBN.
    pub async fn search(
        &self,
        query: &str,
        page: i32,
        field: BookSearchField,
    ) -> GrClientResult<PaginatedList<Work>> {
        let parameters = Parameters::new()
            .query("q", query)
            .query("page", page)
            .option(field);
        let spec = self
            .client
            .build("search", parameters, Method::GET)
            .expect_root("search");
        self.client.execute_typed(&spec).await
    }

    /// Gets the Goodreads id of the book with this ISBN.
    pub async fn id_for_isbn(&self, isbn: &str) -> GrClientResult<Option<i64>> {
        let ids = self.ids_for_isbns(&[isbn]).await?;
        Ok(ids.and_then(|ids| ids.into_iter().next().flatten()))
    }

    /// Gets the Goodreads ids of the books with these ISBNs.
    ///
    /// The result has one entry per ISBN, in the same order, `None` where the ISBN is
    /// unknown. A failed request or an empty reply gives `None`.
    pub async fn ids_for_isbns(&self, isbns: &[&str]) -> GrClientResult<Option<Vec<Option<i64>>>> {
        let spec = self.client.build(
            "book/isbn_to_id",
            Parameters::new().query("isbn", isbns.join(",")),
            Method::GET,
        );

        // plain comma separated text instead of XML
        let raw = self.client.execute_raw(&spec).await?;
        if !raw.is_success() || raw.body.trim().is_empty() {
            tracing::warn!(status = raw.status, "no book ids in response");
            return Ok(None);
        }
        Ok(Some(parse_id_list(&raw.body)))
    }

    /// Gets the work ids of the books with these ids.
    ///
    /// The result has one entry per item of the reply, `None` for blank items. A failed
    /// request or an empty reply gives `None`.
    pub async fn work_ids_for_book_ids(
        &self,
        book_ids: &[i64],
    ) -> GrClientResult<Option<Vec<Option<i64>>>> {
        let joined = book_ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let spec = self.client.build(
            "book/id_to_work_id/{bookIds}",
            Parameters::new().segment("bookIds", joined),
            Method::GET,
        );

        let raw = self.client.execute_raw(&spec).await?;
        if !raw.is_success() || raw.body.trim().is_empty() {
            tracing::warn!(status = raw.status, "no work ids in response");
            return Ok(None);
        }

        let doc = XmlDocument::parse(&raw.body)?;
        let ids = match doc.locate("work-ids") {
            Some(list) => list
                .children_named("item")
                .map(|item| item.text().trim().parse().ok())
                .collect(),
            None => Vec::new(),
        };
        Ok(Some(ids))
    }

    /// Gets review statistics for the books with these ISBNs.
    pub async fn review_stats_for_isbns(&self, isbns: &[&str]) -> GrClientResult<Vec<ReviewStats>> {
        let spec = self.client.build_json(
            "book/review_counts.json",
            Parameters::new().query("isbns", isbns.join(",")),
        );
        let container: ReviewStatsContainer = self.client.execute_json(&spec).await?;
        Ok(container.books)
    }
}

/// Splits `1,,3` into `[Some(1), None, Some(3)]`.
fn parse_id_list(body: &str) -> Vec<Option<i64>> {
    body.trim()
        .split(',')
        .map(|id| id.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1,,2"), vec![Some(1), None, Some(2)]);
        assert_eq!(parse_id_list("375802\n"), vec![Some(375802)]);
        assert_eq!(parse_id_list(","), vec![None, None]);
    }
}
