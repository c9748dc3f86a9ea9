//! Board Configuration

use serde::Deserialize;

/// One of the board's fixed columns
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnSpec {
    pub id: String,
    pub title: String,
}

impl ColumnSpec {
    pub fn new(id: &str, title: &str) -> Self {
        Self { id: id.to_string(), title: title.to_string() }
    }
}

/// Character limits enforced by the card form
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardLimits {
    pub title_max: usize,
    pub text_max: usize,
}

impl Default for CardLimits {
    fn default() -> Self {
        Self { title_max: 70, text_max: 250 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// localStorage key holding the serialized board
    pub storage_key: String,
    pub columns: Vec<ColumnSpec>,
    pub limits: CardLimits,
    /// Lines kept by the in-memory log buffer
    pub log_capacity: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: "kanban-board".to_string(),
            columns: vec![
                ColumnSpec::new("todo", "To Do"),
                ColumnSpec::new("in-progress", "In Progress"),
                ColumnSpec::new("done", "Done"),
            ],
            limits: CardLimits::default(),
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
        }
    }
}

impl BoardConfig {
    /// Parse an override; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Config from the text of the page's `#board-config` element; a
    /// missing or blank element means the defaults
    pub fn from_page(text: Option<&str>) -> Result<Self, serde_json::Error> {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(json) => Self::from_json(json),
            None => Ok(Self::default()),
        }
    }
}
