//! Column ordering driven by the query string.
//!
//! An orderable column renders its header title as a link that cycles the
//! sort direction, and during `process` reads the `orderby` and `orderbydir`
//! parameters from the GET partition. The view itself never sorts rows; the
//! caller reads the chosen column and direction and builds its model.

use serde::{Deserialize, Serialize};

use crate::request::FormData;

/// Query parameter naming the ordered column.
pub const ORDERBY_PARAM: &str = "orderby";
/// Query parameter carrying the direction.
pub const ORDERBY_DIR_PARAM: &str = "orderbydir";

/// Sort direction of an orderable column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    /// Not ordered by this column.
    #[default]
    None,
    /// Ascending order (smallest first).
    Ascending,
    /// Descending order (largest first).
    Descending,
}

impl OrderDirection {
    /// Returns the query string name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderDirection::None => "none",
            OrderDirection::Ascending => "asc",
            OrderDirection::Descending => "desc",
        }
    }

    /// Parses a query string direction.
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "none" => Some(OrderDirection::None),
            "asc" | "ascending" => Some(OrderDirection::Ascending),
            "desc" | "descending" => Some(OrderDirection::Descending),
            _ => None,
        }
    }

    /// The direction a header link switches to.
    pub fn next(self) -> Self {
        match self {
            OrderDirection::None => OrderDirection::Ascending,
            OrderDirection::Ascending => OrderDirection::Descending,
            OrderDirection::Descending => OrderDirection::Ascending,
        }
    }

    pub fn is_ordered(self) -> bool {
        !matches!(self, OrderDirection::None)
    }

    /// CSS class applied to the header cell.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            OrderDirection::None => None,
            OrderDirection::Ascending => Some("swat-table-view-column-sort-ascending"),
            OrderDirection::Descending => Some("swat-table-view-column-sort-descending"),
        }
    }
}

impl std::fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordering state of one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Orderable {
    direction: OrderDirection,
    default_direction: OrderDirection,
    link: String,
}

impl Orderable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base href the ordering query is appended to.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn direction(&self) -> OrderDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: OrderDirection) {
        self.direction = direction;
    }

    /// The direction used when the request names no ordering.
    pub fn set_default_direction(&mut self, direction: OrderDirection) {
        self.default_direction = direction;
        self.direction = direction;
    }

    /// Header link switching this column to its next direction.
    pub fn href(&self, column_id: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair(ORDERBY_PARAM, column_id)
            .append_pair(ORDERBY_DIR_PARAM, self.direction.next().as_str())
            .finish();
        let separator = if self.link.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.link, separator, query)
    }

    /// Reads the ordering for `column_id` from the query.
    pub fn process(&mut self, column_id: &str, query: &FormData) {
        self.direction = match query.get_str(ORDERBY_PARAM) {
            Some(ordered) if ordered == column_id => query
                .get_str(ORDERBY_DIR_PARAM)
                .and_then(OrderDirection::from_param)
                .unwrap_or(OrderDirection::Ascending),
            Some(_) => OrderDirection::None,
            None => self.default_direction,
        };
    }
}
