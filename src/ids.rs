//! Id Generation

use ulid::Ulid;

/// Source of unique ids for new entities
pub trait IdGenerator {
    fn generate_column_id(&mut self) -> String;
    fn generate_card_id(&mut self) -> String;
}

/// `<prefix>-<ulid>`, the ULID built from the browser clock and RNG.
///
/// Collisions are possible in principle and not handled.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeRandomIds;

impl TimeRandomIds {
    fn make(prefix: &str) -> String {
        let millis = js_sys::Date::now() as u64;
        // Math.random carries 53 bits; two draws fill the 80-bit random part
        let high = (js_sys::Math::random() * (1u64 << 40) as f64) as u128;
        let low = (js_sys::Math::random() * (1u64 << 40) as f64) as u128;
        prefixed_ulid(prefix, millis, (high << 40) | low)
    }
}

fn prefixed_ulid(prefix: &str, millis: u64, random: u128) -> String {
    format!("{}-{}", prefix, Ulid::from_parts(millis, random))
}

impl IdGenerator for TimeRandomIds {
    fn generate_column_id(&mut self) -> String {
        Self::make("column")
    }

    fn generate_card_id(&mut self) -> String {
        Self::make("card")
    }
}

/// Deterministic ids: `card-1`, `card-2`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    fn make(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{}-{}", prefix, self.next)
    }
}

impl IdGenerator for SequentialIds {
    fn generate_column_id(&mut self) -> String {
        self.make("column")
    }

    fn generate_card_id(&mut self) -> String {
        self.make("card")
    }
}
