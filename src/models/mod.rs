//! Domain objects hydrated from the service's responses.
//!
//! Every model implements [`Parseable`](crate::Parseable) and keeps its defaults for
//! anything the response leaves out. Nested lists are `None` when their wrapper element
//! is absent and empty when the wrapper is present without items.

mod book;
mod group;
mod owned_book;
pub mod request;
mod review_stats;
mod series;
mod topic;
mod update;
mod work;

pub use book::{AuthorSummary, Book, BookLink, BookSummary};
pub use group::{Group, GroupFolder, GroupSummary, GroupUser, UserSummary};
pub use owned_book::{OwnedBook, OwnedBookSummary};
pub use review_stats::{ReviewStats, ReviewStatsContainer};
pub use series::{Series, SeriesWork};
pub use topic::{Comment, Topic};
pub use update::Update;
pub use work::Work;
