use serde::{Deserialize, Deserializer};

/// Review statistics of one book, from the JSON review counts endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewStats {
    /// The Goodreads id of the book.
    pub id: i64,
    /// The ISBN of the book.
    pub isbn: Option<String>,
    /// The ISBN13 of the book.
    pub isbn13: Option<String>,
    /// The number of ratings of this edition.
    pub ratings_count: i32,
    /// The number of reviews of this edition.
    pub reviews_count: i32,
    /// The number of reviews with text of this edition.
    pub text_reviews_count: i32,
    /// The number of ratings across all editions.
    pub work_ratings_count: i32,
    /// The number of reviews across all editions.
    pub work_reviews_count: i32,
    /// The number of reviews with text across all editions.
    pub work_text_reviews_count: i32,
    /// The average rating across all editions.
    #[serde(deserialize_with = "decimal_from_string")]
    pub average_rating: f64,
}

/// The envelope of the review counts endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewStatsContainer {
    /// One entry per known book.
    #[serde(default)]
    pub books: Vec<ReviewStats>,
}

/// Ratings are sent as strings (`"4.30"`); plain numbers are accepted too.
fn decimal_from_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("rating out of range")),
        serde_json::Value::Null => Ok(0.0),
        other => Err(serde::de::Error::custom(format!(
            "unexpected rating value: {other}"
        ))),
    }
}
