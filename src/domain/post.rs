use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
}

impl Post {
    pub fn new(id: u64, title: String, content: String) -> Self {
        Self { id, title, content }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Content,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(Self::Title),
            "content" => Some(Self::Content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Sort request for listing posts. Both query parameters must be present and
/// recognized; anything else means the current order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn from_params(sort: Option<&str>, direction: Option<&str>) -> Option<Self> {
        let field = SortField::parse(sort?)?;
        let direction = SortDirection::parse(direction?)?;
        Some(Self { field, direction })
    }
}
