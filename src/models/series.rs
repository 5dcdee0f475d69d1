use crate::models::Work;
use crate::traits::Parseable;
use crate::xml::XmlNode;

/// A series of works.
#[derive(Debug, Clone, Default)]
pub struct Series {
    /// The Goodreads id of the series.
    pub id: i64,
    /// The title of the series.
    pub title: String,
    /// The description of the series.
    pub description: String,
    /// A note about the series.
    pub note: String,
    /// The number of works in the series.
    pub series_works_count: i32,
    /// The number of primary works in the series.
    pub primary_work_count: i32,
    /// Whether the works are numbered.
    pub numbered: bool,
    /// The works in the series, each with its position set.
    pub works: Option<Vec<Work>>,
}

impl Parseable for Series {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        // series titles come padded with whitespace inside their CDATA
        self.title = node.element_as_string("title").trim().to_string();
        self.description = node.element_as_string("description").trim().to_string();
        self.note = node.element_as_string("note");
        self.series_works_count = node.element_as_i32("series_works_count");
        self.primary_work_count = node.element_as_i32("primary_work_count");
        self.numbered = node.element_as_bool("numbered");
        self.works = series_works(node);
    }
}

/// Collects the works of a series.
///
/// A full series lists them in its own `series_works` child. A series nested inside
/// `series_works/series_work` only knows its works through the listing it sits in,
/// two levels up.
fn series_works(node: &XmlNode<'_>) -> Option<Vec<Work>> {
    let (listing, nested) = match node.child("series_works") {
        Some(own) => (own, false),
        None => (node.parent()?.parent()?, true),
    };

    let works: Vec<Work> = listing
        .descendants("series_work")
        .into_iter()
        .map(|entry| {
            let mut work = Work::default();
            work.set_user_position(entry.element_as_opt_string("user_position"));
            if let Some(work_node) = entry.child("work") {
                work.parse(&work_node);
            }
            work
        })
        .collect();

    if nested && works.is_empty() {
        None
    } else {
        Some(works)
    }
}

/// An entry of a series listing: a work and the series it belongs to.
#[derive(Debug, Clone, Default)]
pub struct SeriesWork {
    /// The id of the listing entry.
    pub id: i64,
    /// The position of the work inside the series.
    pub user_position: Option<String>,
    /// The series.
    pub series: Option<Series>,
}

impl Parseable for SeriesWork {
    fn parse(&mut self, node: &XmlNode<'_>) {
        self.id = node.element_as_i64("id");
        self.user_position = node.element_as_opt_string("user_position");
        self.series = node.element_as_object("series");
    }
}
