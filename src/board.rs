//! Board
//!
//! The fixed set of columns and the card operations the UI performs on them.
//! Each mutation is persisted before the in-memory board changes, so a
//! failed write leaves both sides as they were.

use thiserror::Error;

use crate::config::{CardLimits, ColumnSpec};
use crate::ids::IdGenerator;
use crate::models::{Card, Column};
use crate::store::{ColumnStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("title is required")]
    EmptyTitle,
    #[error("title is {len} characters, limit is {max}")]
    TitleTooLong { len: usize, max: usize },
    #[error("text is {len} characters, limit is {max}")]
    TextTooLong { len: usize, max: usize },
}

/// Title and text submitted by the card form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub title: String,
    pub text: String,
}

impl CardDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self { title: title.into(), text: text.into() }
    }

    /// Trim and check against the limits; lengths count characters
    pub fn validate(self, limits: &CardLimits) -> Result<Self, DraftError> {
        let title = self.title.trim().to_string();
        let text = self.text.trim().to_string();
        let title_len = title.chars().count();
        let text_len = text.chars().count();

        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if title_len > limits.title_max {
            return Err(DraftError::TitleTooLong { len: title_len, max: limits.title_max });
        }
        if text_len > limits.text_max {
            return Err(DraftError::TextTooLong { len: text_len, max: limits.text_max });
        }
        Ok(Self { title, text })
    }
}

/// Characters left before `max`
pub fn remaining(value: &str, max: usize) -> usize {
    max.saturating_sub(value.chars().count())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    specs: Vec<ColumnSpec>,
    columns: Vec<Column>,
}

impl Board {
    /// Build the configured columns from the store
    pub fn load(specs: &[ColumnSpec], store: &mut dyn ColumnStore) -> Result<Self, StoreError> {
        let columns = specs
            .iter()
            .map(|spec| Column::load(spec, &mut *store))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(
            "[BOARD] loaded {} columns, {} cards",
            columns.len(),
            columns.iter().map(Column::len).sum::<usize>()
        );
        Ok(Self { specs: specs.to_vec(), columns })
    }

    /// Board with no backing store, for tests and previews
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let specs = columns.iter().map(|c| ColumnSpec::new(c.id(), c.title())).collect();
        Self { specs, columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id() == column_id)
    }

    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id() == column_id)
    }

    /// (column index, card index) of a card
    pub fn locate(&self, card_id: &str) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, column)| column.position_of(card_id).map(|i| (ci, i)))
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        let (ci, i) = self.locate(card_id)?;
        self.columns[ci].cards().get(i)
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Create a card at the end of a column
    pub fn add_card(
        &mut self,
        column_id: &str,
        draft: CardDraft,
        ids: &mut dyn IdGenerator,
        store: &mut dyn ColumnStore,
    ) -> Result<Card, StoreError> {
        if self.column(column_id).is_none() {
            return Err(StoreError::UnknownColumn(column_id.to_string()));
        }
        let card = Card::new(ids.generate_card_id(), draft.title, draft.text, column_id);
        store.add_card_to_column(column_id, &card.to_record())?;

        if let Some(column) = self.column_mut(column_id) {
            column.add_card(card.clone());
        }
        tracing::debug!("[BOARD] added {} to {}", card.id(), column_id);
        Ok(card)
    }

    /// Returns whether the card existed
    pub fn delete_card(&mut self, card_id: &str, store: &mut dyn ColumnStore) -> Result<bool, StoreError> {
        let Some((ci, _)) = self.locate(card_id) else {
            return Ok(false);
        };
        let column_id = self.columns[ci].id().to_string();
        store.remove_card_from_column(&column_id, card_id)?;
        self.columns[ci].remove_card(card_id);
        tracing::debug!("[BOARD] deleted {} from {}", card_id, column_id);
        Ok(true)
    }

    /// Replace a card's title and text in place
    pub fn update_card(
        &mut self,
        card_id: &str,
        draft: CardDraft,
        store: &mut dyn ColumnStore,
    ) -> Result<bool, StoreError> {
        let Some((ci, _)) = self.locate(card_id) else {
            return Ok(false);
        };
        let mut column = self.columns[ci].clone();
        if let Some(card) = column.card_mut(card_id) {
            card.set_title(draft.title);
            card.set_text(draft.text);
        }
        store.save_column(&column.to_record())?;
        self.columns[ci] = column;
        Ok(true)
    }

    /// Move a card within the in-memory board only. Returns the index it
    /// landed at, or `None` if the card or target column is unknown.
    pub fn move_card(&mut self, card_id: &str, target_column_id: &str, index: usize) -> Option<usize> {
        let ti = self.columns.iter().position(|c| c.id() == target_column_id)?;
        let (ci, _) = self.locate(card_id)?;
        let card = self.columns[ci].remove_card(card_id)?;
        Some(self.columns[ti].insert_card(index, card))
    }

    /// Drop every stored column, then recreate the configured ones empty
    pub fn clear(&mut self, store: &mut dyn ColumnStore) -> Result<(), StoreError> {
        store.clear_all()?;
        self.reload(store)
    }

    /// Rebuild from the store
    pub fn reload(&mut self, store: &mut dyn ColumnStore) -> Result<(), StoreError> {
        *self = Self::load(&self.specs, store)?;
        Ok(())
    }
}
