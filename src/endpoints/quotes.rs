use crate::client::states::Authorized;
use crate::endpoints::expect_status;
use crate::error::GoodreadsError;
use crate::{GoodreadsClient, GrClientResult, Method, Parameters};

/// Quotes.
#[derive(Debug)]
pub struct QuotesEndpoint<'a> {
    client: &'a GoodreadsClient<Authorized>,
}

/// A quote to add, attributed to a book by id or ISBN.
#[derive(Debug, Clone, Default)]
pub struct NewQuote<'q> {
    /// The id of the quoted author.
    pub author_id: i64,
    /// The name of the quoted author.
    pub author_name: &'q str,
    /// The quote.
    pub body: &'q str,
    /// The id of the quoted book.
    pub book_id: Option<i64>,
    /// The ISBN of the quoted book.
    pub isbn: Option<&'q str>,
}

impl<'a> QuotesEndpoint<'a> {
    pub(crate) fn new(client: &'a GoodreadsClient<Authorized>) -> Self {
        Self { client }
    }

    /// Adds a quote on behalf of the user.
    ///
    /// Returns whether the service answered with status 201. Fails before sending
    /// anything if the quote names neither a book id nor an ISBN.
    pub async fn add(&self, quote: &NewQuote<'_>) -> GrClientResult<bool> {
        let isbn = quote.isbn.filter(|isbn| !isbn.trim().is_empty());
        if quote.book_id.is_none() && isbn.is_none() {
            return Err(GoodreadsError::InvalidArgument(
                "a quote needs either a book id or an ISBN".to_string(),
            ));
        }

        let parameters = Parameters::new()
            .query("quote[author_name]", quote.author_name)
            .query("quote[author_id]", quote.author_id)
            .query("quote[body]", quote.body)
            .query_opt("quote[book_id]", quote.book_id)
            .query_opt("isbn", isbn);
        let spec = self.client.build("quotes", parameters, Method::POST);
        let raw = self.client.execute_raw(&spec).await?;
        Ok(expect_status(&raw, 201, "quote add"))
    }
}
