use super::{ItemRecord, StockFailure};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How the cotton percentage of an item is compared against the query values.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Comparison {
    /// Exactly equal to the single value
    #[default]
    Equal,
    /// Strictly less than the single value
    LessThan,
    /// Strictly greater than the single value
    MoreThan,
    /// Within the inclusive range spanned by the two values
    Between,
}

/// The field a query result is ordered by.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortField {
    /// Order of creation, i.e. by id
    #[default]
    #[serde(rename = "NOTHING")]
    Unsorted,
    /// Lexicographic order of the color
    Color,
    /// Numeric order of the cotton percentage
    CottonPercentage,
}

impl SortField {
    /// Sort `items` by this field, descending if `ascending` is false.
    ///
    /// The sort is stable, so items comparing equal keep their relative order
    /// in either direction.
    pub fn sort<ItemId: Ord>(&self, items: &mut [ItemRecord<ItemId>], ascending: bool) {
        let compare = |a: &ItemRecord<ItemId>, b: &ItemRecord<ItemId>| -> Ordering {
            match self {
                SortField::Unsorted => a.id.cmp(&b.id),
                SortField::Color => a.color.cmp(&b.color),
                SortField::CottonPercentage => a.cotton_percentage.total_cmp(&b.cotton_percentage),
            }
        };

        if ascending {
            items.sort_by(compare);
        } else {
            items.sort_by(|a, b| compare(b, a));
        }
    }
}

fn default_true() -> bool {
    true
}

/// The raw parameters of a filtered listing, as received from a client.
///
/// Use [`ItemQuery::filter`] to validate the combination and obtain the
/// [`ItemFilter`] that storage adapters understand.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    /// Restrict to exactly this color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// How to compare the cotton percentage (ignored without values)
    #[serde(default)]
    pub comparison: Comparison,

    /// One value, or two for `between`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cotton_percentage: Vec<f64>,

    /// The field to order the results by
    #[serde(default)]
    pub field_for_sort: SortField,

    /// Ascending (the default) or descending order
    #[serde(default = "default_true")]
    pub asc: bool,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            color: None,
            comparison: Comparison::default(),
            cotton_percentage: Vec::new(),
            field_for_sort: SortField::default(),
            asc: true,
        }
    }
}

impl ItemQuery {
    /// Validate the parameters and build the storage filter.
    ///
    /// `between` takes exactly two values and every other comparison exactly
    /// one; the two values of a range may come in either order.
    pub fn filter(&self) -> Result<ItemFilter, StockFailure> {
        let composition = match (self.comparison, self.cotton_percentage.as_slice()) {
            (_, []) => None,
            (Comparison::Equal, [value]) => Some(CompositionFilter::Equal(*value)),
            (Comparison::LessThan, [value]) => Some(CompositionFilter::LessThan(*value)),
            (Comparison::MoreThan, [value]) => Some(CompositionFilter::MoreThan(*value)),
            (Comparison::Between, [a, b]) => {
                let (lo, hi) = if b < a { (*b, *a) } else { (*a, *b) };
                Some(CompositionFilter::Between(lo, hi))
            }
            _ => return Err(StockFailure::InvalidParameters),
        };

        Ok(ItemFilter {
            color: self.color.clone(),
            composition,
        })
    }
}

/// A validated restriction on the cotton percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompositionFilter {
    /// `value == x`
    Equal(f64),
    /// `value < x`
    LessThan(f64),
    /// `value > x`
    MoreThan(f64),
    /// `lo <= value <= hi`, with `lo <= hi`
    Between(f64, f64),
}

/// The selection a storage adapter must perform for a listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    /// Exact color match, if any
    pub color: Option<String>,
    /// Cotton percentage restriction, if any
    pub composition: Option<CompositionFilter>,
}

/// The response to a listing.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemQueryResponse<T> {
    /// The matching items, in the requested order
    pub socks: Vec<T>,
}
