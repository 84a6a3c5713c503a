mod common;

use common::{open, socks};
use socks_core::{
    models::{ItemUpdate, StockFailure},
    ports::InventoryRepository as _,
};
use socks_sqlite::types::ItemId;

#[tokio::test]
async fn test_income_outcome_scenario() -> anyhow::Result<()> {
    let db = open().await?;

    let created = db.income(socks("white", 33.5, 10)).await??;
    assert_eq!(created.color, "white");
    assert_eq!(created.cotton_percentage, 33.5);
    assert_eq!(created.quantity, 10);

    // a second income on the same identity increments instead of duplicating
    let incremented = db.income(socks("white", 33.5, 5)).await??;
    assert_eq!(incremented.id, created.id);
    assert_eq!(incremented.quantity, 15);

    let refused = db.outcome(socks("white", 33.5, 20)).await?;
    assert_eq!(
        refused,
        Err(StockFailure::InsufficientStock {
            available: 15,
            requested: 20
        })
    );
    let unchanged = db.find_item("white", 33.5).await?.unwrap();
    assert_eq!(unchanged.quantity, 15);

    let emptied = db.outcome(socks("white", 33.5, 15)).await??;
    assert_eq!(emptied.quantity, 0);
    let stored = db.find_item("white", 33.5).await?.unwrap();
    assert_eq!((stored.id, stored.quantity), (created.id, 0));

    Ok(())
}

#[tokio::test]
async fn test_identity_is_exact() -> anyhow::Result<()> {
    let db = open().await?;

    let a = db.income(socks("white", 33.5, 1)).await??;
    let b = db.income(socks("white", 33.6, 1)).await??;
    let c = db.income(socks("White", 33.5, 1)).await??;

    assert_ne!(a.id, b.id);
    assert_ne!(a.id, c.id);
    assert!(db.find_item("white", 33.50001).await?.is_none());
    assert_eq!(db.find_item("white", 33.5).await?.unwrap().id, a.id);

    Ok(())
}

#[tokio::test]
async fn test_outcome_unknown_item() -> anyhow::Result<()> {
    let db = open().await?;

    assert_eq!(
        db.outcome(socks("black", 50.0, 1)).await?,
        Err(StockFailure::ItemNotFound)
    );
    // nothing was created along the way
    assert!(db.find_item("black", 50.0).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_income_validation() -> anyhow::Result<()> {
    let db = open().await?;

    assert!(matches!(
        db.income(socks("white", 0.0, 10)).await?,
        Err(StockFailure::InvalidItem(_))
    ));
    assert!(matches!(
        db.income(socks("white", 101.0, 10)).await?,
        Err(StockFailure::InvalidItem(_))
    ));
    assert!(matches!(
        db.income(socks("white", 50.0, 0)).await?,
        Err(StockFailure::InvalidItem(_))
    ));
    assert!(db.find_item("white", 50.0).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_income_overflow_leaves_stock() -> anyhow::Result<()> {
    let db = open().await?;

    db.income(socks("red", 10.0, u32::MAX)).await??;
    assert_eq!(
        db.income(socks("red", 10.0, 1)).await?,
        Err(StockFailure::QuantityOverflow)
    );
    assert_eq!(db.find_item("red", 10.0).await?.unwrap().quantity, u32::MAX);

    Ok(())
}

#[tokio::test]
async fn test_update_partial() -> anyhow::Result<()> {
    let db = open().await?;
    let item = db.income(socks("white", 33.5, 10)).await??;

    let updated = db
        .update_item(
            item.id,
            ItemUpdate {
                quantity: Some(20),
                ..Default::default()
            },
        )
        .await??;
    assert_eq!(updated.color, "white");
    assert_eq!(updated.cotton_percentage, 33.5);
    assert_eq!(updated.quantity, 20);

    let untouched = db.update_item(item.id, ItemUpdate::default()).await??;
    assert_eq!(untouched, updated);

    let recolored = db
        .update_item(
            item.id,
            ItemUpdate {
                color: Some("grey".to_owned()),
                cotton_percentage: Some(40.0),
                quantity: None,
            },
        )
        .await??;
    assert_eq!(recolored.quantity, 20);
    assert!(db.find_item("white", 33.5).await?.is_none());
    assert_eq!(db.find_item("grey", 40.0).await?, Some(recolored));

    Ok(())
}

#[tokio::test]
async fn test_update_unknown_item() -> anyhow::Result<()> {
    let db = open().await?;

    assert_eq!(
        db.update_item(ItemId(42), ItemUpdate::default()).await?,
        Err(StockFailure::ItemNotFound)
    );

    Ok(())
}
