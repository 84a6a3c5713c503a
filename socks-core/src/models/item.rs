use super::StockFailure;
use serde::{Deserialize, Serialize};

/// The boundary representation of a batch of socks.
///
/// This is the body of income and outcome requests and the shape of a single
/// CSV row. It names an item by its identity (color and cotton percentage)
/// and carries the quantity to move.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    /// The color of the socks
    pub color: String,
    /// The cotton content, in percent, within (0, 100]
    pub cotton_percentage: f64,
    /// The number of pairs, strictly positive
    pub quantity: u32,
}

impl ItemData {
    /// Check the constraints a client-submitted item must satisfy.
    pub fn validate(&self) -> Result<(), StockFailure> {
        if !(self.cotton_percentage > 0.0 && self.cotton_percentage <= 100.0) {
            return Err(StockFailure::InvalidItem(
                "cotton percentage must be within (0, 100]",
            ));
        }
        if self.quantity == 0 {
            return Err(StockFailure::InvalidItem("quantity must be positive"));
        }
        Ok(())
    }
}

/// An inventory item as held by storage.
///
/// The `id` is assigned by the repository on creation and never changes.
/// The logical identity of the item is the pair `(color, cotton_percentage)`.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord<ItemId> {
    /// The storage-assigned identifier
    pub id: ItemId,
    /// The color of the socks
    pub color: String,
    /// The cotton content, in percent
    pub cotton_percentage: f64,
    /// The number of pairs in stock
    pub quantity: u32,
}

impl<ItemId> ItemRecord<ItemId> {
    /// Add `delta` pairs to the stock.
    pub fn income(&mut self, delta: u32) -> Result<(), StockFailure> {
        if delta == 0 {
            return Err(StockFailure::InvalidItem("quantity must be positive"));
        }
        self.quantity = self
            .quantity
            .checked_add(delta)
            .ok_or(StockFailure::QuantityOverflow)?;
        Ok(())
    }

    /// Remove `delta` pairs from the stock.
    ///
    /// Fails without touching the record if fewer than `delta` pairs are
    /// available.
    pub fn outcome(&mut self, delta: u32) -> Result<(), StockFailure> {
        if delta == 0 {
            return Err(StockFailure::InvalidItem("quantity must be positive"));
        }
        if self.quantity < delta {
            return Err(StockFailure::InsufficientStock {
                available: self.quantity,
                requested: delta,
            });
        }
        self.quantity -= delta;
        Ok(())
    }

    /// Overwrite whichever fields the update supplies.
    ///
    /// Values are taken verbatim; range checks are the caller's concern.
    pub fn apply(&mut self, update: ItemUpdate) {
        let ItemUpdate {
            color,
            cotton_percentage,
            quantity,
        } = update;

        if let Some(color) = color {
            self.color = color;
        }
        if let Some(cotton_percentage) = cotton_percentage {
            self.cotton_percentage = cotton_percentage;
        }
        if let Some(quantity) = quantity {
            self.quantity = quantity;
        }
    }
}

/// A partial replacement of an item's fields.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    /// A new color, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// A new cotton percentage, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cotton_percentage: Option<f64>,
    /// A new quantity, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl ItemUpdate {
    /// True if no field would change.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.cotton_percentage.is_none() && self.quantity.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn white(quantity: u32) -> ItemRecord<u32> {
        ItemRecord {
            id: 1,
            color: "white".to_owned(),
            cotton_percentage: 33.5,
            quantity,
        }
    }

    #[test]
    fn test_income_increments() {
        let mut item = white(10);
        item.income(5).unwrap();
        assert_eq!(item.quantity, 15);
    }

    #[test]
    fn test_income_overflow() {
        let mut item = white(u32::MAX);
        assert_eq!(item.income(1), Err(StockFailure::QuantityOverflow));
        assert_eq!(item.quantity, u32::MAX);
    }

    #[test]
    fn test_outcome_insufficient() {
        let mut item = white(15);
        assert_eq!(
            item.outcome(20),
            Err(StockFailure::InsufficientStock {
                available: 15,
                requested: 20
            })
        );
        assert_eq!(item.quantity, 15);
    }

    #[test]
    fn test_outcome_to_zero() {
        let mut item = white(15);
        item.outcome(15).unwrap();
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn test_zero_delta_rejected() {
        let mut item = white(15);
        assert!(item.income(0).is_err());
        assert!(item.outcome(0).is_err());
        assert_eq!(item.quantity, 15);
    }

    #[test]
    fn test_update_quantity_only() {
        let mut item = white(15);
        item.apply(ItemUpdate {
            quantity: Some(20),
            ..Default::default()
        });
        assert_eq!(item.color, "white");
        assert_eq!(item.cotton_percentage, 33.5);
        assert_eq!(item.quantity, 20);
    }

    #[test]
    fn test_update_nothing() {
        let mut item = white(15);
        let update = ItemUpdate::default();
        assert!(update.is_empty());
        item.apply(update);
        assert_eq!(item, white(15));
    }

    #[test]
    fn test_update_is_verbatim() {
        // no range checks at this layer
        let mut item = white(15);
        item.apply(ItemUpdate {
            color: Some("black".to_owned()),
            cotton_percentage: Some(250.0),
            quantity: None,
        });
        assert_eq!(item.color, "black");
        assert_eq!(item.cotton_percentage, 250.0);
        assert_eq!(item.quantity, 15);
    }

    #[rstest]
    #[case(33.5, 10, true)]
    #[case(100.0, 1, true)]
    #[case(0.0, 10, false)]
    #[case(-1.0, 10, false)]
    #[case(100.5, 10, false)]
    #[case(f64::NAN, 10, false)]
    #[case(50.0, 0, false)]
    fn test_validate(#[case] cotton_percentage: f64, #[case] quantity: u32, #[case] ok: bool) {
        let data = ItemData {
            color: "red".to_owned(),
            cotton_percentage,
            quantity,
        };
        assert_eq!(data.validate().is_ok(), ok);
    }

    #[test]
    fn test_item_data_wire_names() {
        let data: ItemData =
            serde_json::from_str(r#"{"color":"red","cottonPercentage":40,"quantity":3}"#).unwrap();
        assert_eq!(data.cotton_percentage, 40.0);
        assert_eq!(data.quantity, 3);
    }
}
