mod inventory;
pub use inventory::InventoryRepository;

/// The base trait of every repository, fixing the types an adapter works with.
pub trait Repository {
    /// The infrastructure error of the adapter.
    ///
    /// Domain failures are reported separately through
    /// [`StockFailure`](crate::models::StockFailure).
    type Error: std::error::Error + Send + Sync + 'static;

    /// The storage-assigned identifier of an item.
    type ItemId: Clone + Ord + std::fmt::Debug + Send + Sync + 'static;
}

/// An application ties a repository to the rest of the service.
///
/// Transport adapters are written against this trait, so that the concrete
/// storage is chosen when the binary is composed.
pub trait Application: Send + Sync {
    /// The repository the application stores its items in
    type Repository: InventoryRepository;

    /// Access the repository
    fn database(&self) -> &Self::Repository;
}
