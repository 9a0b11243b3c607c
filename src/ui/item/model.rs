use crate::data::Item;

/// An item as the screens display and edit it: numbers kept as text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemDetails {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl ItemDetails {
    /// Convert back to an [`Item`]. Unparsable numbers become zero.
    pub fn to_item(&self) -> Item {
        Item {
            id: self.id,
            name: self.name.clone(),
            price: self.price.trim().parse().unwrap_or(0.0),
            quantity: self.quantity.trim().parse().unwrap_or(0),
        }
    }

    /// Whether the text fields describe a storable item.
    pub fn is_valid(&self) -> bool {
        let price_ok = self
            .price
            .trim()
            .parse::<f64>()
            .is_ok_and(|p| p.is_finite() && p >= 0.0);
        let quantity_ok = self.quantity.trim().parse::<i32>().is_ok_and(|q| q >= 0);
        !self.name.trim().is_empty() && price_ok && quantity_ok
    }
}

impl From<&Item> for ItemDetails {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
        }
    }
}

impl From<Item> for ItemDetails {
    fn from(item: Item) -> Self {
        Self::from(&item)
    }
}
