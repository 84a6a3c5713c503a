use crate::models::{
    ImportSummary, ItemData, ItemQuery, ItemRecord, ItemUpdate, StockFailure,
};
use std::future::Future;

/// Repository interface for the sock inventory.
///
/// Every operation that mutates an item must do so atomically: the lookup,
/// the rule check and the write happen in one storage transaction, so that
/// concurrent income and outcome on the same item cannot interleave.
///
/// Operations that can fail for domain reasons return
/// `Result<Result<T, StockFailure>, Self::Error>`, where the outer error is
/// reserved for infrastructure problems.
pub trait InventoryRepository: super::Repository {
    /// Find the item with exactly this color and cotton percentage.
    ///
    /// The percentage is compared for exact equality.
    fn find_item(
        &self,
        color: &str,
        cotton_percentage: f64,
    ) -> impl Future<Output = Result<Option<ItemRecord<Self::ItemId>>, Self::Error>> + Send;

    /// List the items selected by `query`, in the order it requests.
    ///
    /// # Returns
    ///
    /// - Ok(Err(InvalidParameters)) if the comparison and the number of
    ///   percentage values do not fit together
    /// - Ok(Err(ItemNotFound)) if nothing matches
    fn query_items(
        &self,
        query: ItemQuery,
    ) -> impl Future<Output = Result<Result<Vec<ItemRecord<Self::ItemId>>, StockFailure>, Self::Error>>
    + Send;

    /// Register incoming socks.
    ///
    /// Increments the item with the same identity, or creates it if none
    /// exists. Returns the resulting record.
    fn income(
        &self,
        data: ItemData,
    ) -> impl Future<Output = Result<Result<ItemRecord<Self::ItemId>, StockFailure>, Self::Error>>
    + Send;

    /// Register outgoing socks.
    ///
    /// # Returns
    ///
    /// - Ok(Err(ItemNotFound)) if no item has this identity; nothing is created
    /// - Ok(Err(InsufficientStock)) if the item holds fewer pairs than requested;
    ///   the item is left unchanged
    fn outcome(
        &self,
        data: ItemData,
    ) -> impl Future<Output = Result<Result<ItemRecord<Self::ItemId>, StockFailure>, Self::Error>>
    + Send;

    /// Replace the supplied fields of an item.
    ///
    /// # Returns
    ///
    /// Ok(Err(ItemNotFound)) if there is no item with this id.
    fn update_item(
        &self,
        item_id: Self::ItemId,
        update: ItemUpdate,
    ) -> impl Future<Output = Result<Result<ItemRecord<Self::ItemId>, StockFailure>, Self::Error>>
    + Send;

    /// Merge a parsed batch into the inventory.
    ///
    /// Each row whose identity already exists in storage increments that item.
    /// The remaining rows are stored as new items in one bulk write after all
    /// rows have been processed. Rows are not merged with each other: two new
    /// rows with the same identity produce two items.
    fn import_batch(
        &self,
        rows: Vec<ItemData>,
    ) -> impl Future<Output = Result<Result<ImportSummary, StockFailure>, Self::Error>> + Send;
}
