//! Board Models
//!
//! Persisted records and the in-memory cards and columns built from them.

use serde::{Deserialize, Serialize};

use crate::config::ColumnSpec;
use crate::store::{ColumnStore, StoreError};

/// Card as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    pub title: String,
    pub text: String,
    pub column_id: String,
}

/// Column as stored; card order is the on-screen order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<CardRecord>,
}

impl ColumnRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), cards: Vec::new() }
    }

    pub fn position_of(&self, card_id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == card_id)
    }

    pub fn card_ids(&self) -> Vec<String> {
        self.cards.iter().map(|c| c.id.clone()).collect()
    }
}

/// A task card
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    id: String,
    title: String,
    text: String,
    column_id: String,
}

impl Card {
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>, column_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            column_id: column_id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_column_id(&mut self, column_id: impl Into<String>) {
        self.column_id = column_id.into();
    }

    pub fn to_record(&self) -> CardRecord {
        CardRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            text: self.text.clone(),
            column_id: self.column_id.clone(),
        }
    }
}

impl From<CardRecord> for Card {
    fn from(r: CardRecord) -> Self {
        Self { id: r.id, title: r.title, text: r.text, column_id: r.column_id }
    }
}

/// A workflow stage holding an ordered list of cards
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    id: String,
    title: String,
    cards: Vec<Card>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), cards: Vec::new() }
    }

    /// Build from the stored record, creating an empty one if absent
    pub fn load(spec: &ColumnSpec, store: &mut dyn ColumnStore) -> Result<Self, StoreError> {
        let mut column = Self::new(&spec.id, &spec.title);
        match store.get_column(&spec.id)? {
            Some(record) => {
                column.cards = record.cards.into_iter().map(Card::from).collect();
            }
            None => {
                tracing::debug!("[BOARD] creating record for column {}", spec.id);
                store.save_column(&column.to_record())?;
            }
        }
        Ok(column)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_ids(&self) -> Vec<String> {
        self.cards.iter().map(|c| c.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn position_of(&self, card_id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }

    /// Append a card, taking ownership of its column membership
    pub fn add_card(&mut self, mut card: Card) {
        card.set_column_id(&self.id);
        self.cards.push(card);
    }

    /// Insert at `index`, clamped to the end
    pub fn insert_card(&mut self, index: usize, mut card: Card) -> usize {
        card.set_column_id(&self.id);
        let index = index.min(self.cards.len());
        self.cards.insert(index, card);
        index
    }

    pub fn remove_card(&mut self, card_id: &str) -> Option<Card> {
        let index = self.position_of(card_id)?;
        Some(self.cards.remove(index))
    }

    pub fn to_record(&self) -> ColumnRecord {
        ColumnRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            cards: self.cards.iter().map(Card::to_record).collect(),
        }
    }
}
