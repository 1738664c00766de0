use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::media::Media;

/// Errors raised while building a `MediaOrdering`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    #[error("at least one sort field is required")]
    Empty,

    #[error("{directions} sort directions given for {fields} sort fields")]
    SizeMismatch { fields: usize, directions: usize },

    #[error("unknown sort field: {0}")]
    UnknownField(String),

    #[error("unknown sort direction: {0} (expected asc or desc)")]
    UnknownDirection(String),
}

/// Media columns a listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Title,
    Slug,
    Date,
    Visits,
}

impl SortField {
    /// Qualified column name in the `media m` query alias
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Title => "m.title",
            SortField::Slug => "m.slug",
            SortField::Date => "m.date",
            SortField::Visits => "m.visits",
        }
    }

    fn compare(&self, a: &Media, b: &Media) -> Ordering {
        match self {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Slug => a.slug.cmp(&b.slug),
            SortField::Date => a.date.cmp(&b.date),
            SortField::Visits => a.visits.cmp(&b.visits),
        }
    }
}

impl FromStr for SortField {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "slug" => Ok(SortField::Slug),
            "date" => Ok(SortField::Date),
            "visits" => Ok(SortField::Visits),
            _ => Err(OrderingError::UnknownField(s.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Title => write!(f, "title"),
            SortField::Slug => write!(f, "slug"),
            SortField::Date => write!(f, "date"),
            SortField::Visits => write!(f, "visits"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(OrderingError::UnknownDirection(s.to_string())),
        }
    }
}

/// Ordering applied to media listings
///
/// Built from two parallel lists, sort fields and directions. The
/// directions list must be empty (every field sorts descending), hold a
/// single entry (applied to every field), or match the fields one to one.
///
/// # Example
/// ```
/// use media_catalog::domain::media::{MediaOrdering, OrderingError};
///
/// let ordering = MediaOrdering::from_parts(&["visits", "title"], &["desc", "asc"])
///     .expect("valid ordering");
/// assert_eq!(ordering.keys().len(), 2);
///
/// let err = MediaOrdering::from_parts(&["visits", "title", "date"], &["desc", "asc"]);
/// assert_eq!(err, Err(OrderingError::SizeMismatch { fields: 3, directions: 2 }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaOrdering {
    keys: Vec<(SortField, SortDirection)>,
}

impl MediaOrdering {
    /// Orders by a single field
    pub fn by(field: SortField, direction: SortDirection) -> Self {
        Self {
            keys: vec![(field, direction)],
        }
    }

    /// Parses and validates parallel field/direction lists
    pub fn from_parts<F, D>(fields: &[F], directions: &[D]) -> Result<Self, OrderingError>
    where
        F: AsRef<str>,
        D: AsRef<str>,
    {
        if fields.is_empty() {
            return Err(OrderingError::Empty);
        }

        let directions: Vec<SortDirection> = directions
            .iter()
            .map(|d| d.as_ref().parse::<SortDirection>())
            .collect::<Result<_, OrderingError>>()?;

        let directions = match directions.len() {
            0 => vec![SortDirection::Desc; fields.len()],
            1 => vec![directions[0]; fields.len()],
            n if n == fields.len() => directions,
            n => {
                return Err(OrderingError::SizeMismatch {
                    fields: fields.len(),
                    directions: n,
                })
            }
        };

        let keys = fields
            .iter()
            .zip(directions)
            .map(|(field, direction)| Ok((field.as_ref().parse::<SortField>()?, direction)))
            .collect::<Result<Vec<_>, OrderingError>>()?;

        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[(SortField, SortDirection)] {
        &self.keys
    }

    /// Compares two media items by the ordering keys, then by id
    pub fn compare(&self, a: &Media, b: &Media) -> Ordering {
        self.keys
            .iter()
            .map(|(field, direction)| match direction {
                SortDirection::Asc => field.compare(a, b),
                SortDirection::Desc => field.compare(b, a),
            })
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }

    /// Renders the `ORDER BY` body, ending with an `m.id` tie-breaker
    ///
    /// Only whitelisted column names are emitted, so the result is safe to
    /// splice into SQL.
    pub fn to_sql(&self) -> String {
        let mut parts: Vec<String> = self
            .keys
            .iter()
            .map(|(field, direction)| format!("{} {}", field.column(), direction.as_sql()))
            .collect();
        parts.push("m.id ASC".to_string());
        parts.join(", ")
    }
}

impl Default for MediaOrdering {
    fn default() -> Self {
        Self::by(SortField::Date, SortDirection::Desc)
    }
}
