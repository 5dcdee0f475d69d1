//! Typed endpoint groups.
//!
//! Each group borrows the client and turns its arguments into a [`RequestSpec`](crate::RequestSpec)
//! for the transport executor. Groups or calls that act on behalf of a user are only
//! available on a [`GoodreadsClient<Authorized>`].

mod books;
mod groups;
mod owned_books;
mod quotes;
mod series;
mod topics;
mod updates;

pub use books::BooksEndpoint;
pub use groups::GroupsEndpoint;
pub use owned_books::{NewOwnedBook, OwnedBooksEndpoint};
pub use quotes::{NewQuote, QuotesEndpoint};
pub use series::SeriesEndpoint;
pub use topics::{NewTopic, TopicsEndpoint};
pub use updates::UpdatesEndpoint;

use crate::client::states::{AuthState, Authorized};
use crate::responses::RawResult;
use crate::GoodreadsClient;

impl<State: AuthState> GoodreadsClient<State> {
    /// Book lookups and searches.
    pub fn books(&self) -> BooksEndpoint<'_, State> {
        BooksEndpoint::new(self)
    }

    /// Series lookups.
    pub fn series(&self) -> SeriesEndpoint<'_, State> {
        SeriesEndpoint::new(self)
    }

    /// Group lookups. Joining a group needs an authorized client.
    pub fn groups(&self) -> GroupsEndpoint<'_, State> {
        GroupsEndpoint::new(self)
    }

    /// Discussion topics. Unread topics and new topics need an authorized client.
    pub fn topics(&self) -> TopicsEndpoint<'_, State> {
        TopicsEndpoint::new(self)
    }
}

impl GoodreadsClient<Authorized> {
    /// Quotes.
    pub fn quotes(&self) -> QuotesEndpoint<'_> {
        QuotesEndpoint::new(self)
    }

    /// The friends' updates feed.
    pub fn updates(&self) -> UpdatesEndpoint<'_> {
        UpdatesEndpoint::new(self)
    }

    /// The user's collection of owned books.
    pub fn owned_books(&self) -> OwnedBooksEndpoint<'_> {
        OwnedBooksEndpoint::new(self)
    }
}

/// Logs and reports whether an action was answered with exactly the expected status.
fn expect_status(raw: &RawResult, expected: u16, action: &str) -> bool {
    if raw.is_status(expected) {
        return true;
    }
    tracing::warn!(status = raw.status, expected, action, "unexpected status");
    false
}
