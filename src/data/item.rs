use serde::{Deserialize, Serialize};

use super::error::{RepositoryError, RepositoryResult};

/// A stock-keeping record.
///
/// `id` is assigned by storage; an `id` of `0` on insert means "not yet stored".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64, quantity: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// Price rendered as a currency amount, e.g. `$12.50`.
    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }

    /// Checks the at-rest invariants every stored item must hold.
    pub fn validate(&self) -> RepositoryResult<()> {
        if self.name.trim().is_empty() {
            return Err(RepositoryError::Invalid {
                message: "name must not be blank".to_string(),
            });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(RepositoryError::Invalid {
                message: format!("price must be a non-negative amount, got {}", self.price),
            });
        }
        if self.quantity < 0 {
            return Err(RepositoryError::Invalid {
                message: format!("quantity must not be negative, got {}", self.quantity),
            });
        }
        Ok(())
    }
}
