use crate::Db;
use crate::types::{ItemId, ItemRow};
use socks_core::{
    models::{
        CompositionFilter, ImportSummary, ItemData, ItemFilter, ItemQuery, ItemRecord, ItemUpdate,
        StockFailure,
    },
    ports::InventoryRepository,
};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// Rows per insert statement when storing a batch; 3 bound values each keeps
/// us well below SQLite's variable limit.
const BULK_INSERT_ROWS: usize = 1000;

impl InventoryRepository for Db {
    async fn find_item(
        &self,
        color: &str,
        cotton_percentage: f64,
    ) -> Result<Option<ItemRecord<Self::ItemId>>, Self::Error> {
        let mut conn = self.reader.acquire().await?;
        find_identity(&mut conn, color, cotton_percentage).await
    }

    async fn query_items(
        &self,
        query: ItemQuery,
    ) -> Result<Result<Vec<ItemRecord<Self::ItemId>>, StockFailure>, Self::Error> {
        let filter = match query.filter() {
            Ok(filter) => filter,
            Err(failure) => return Ok(Err(failure)),
        };

        let mut builder =
            QueryBuilder::new("select id, color, cotton_percentage, quantity from item where 1 = 1");
        push_filter(&mut builder, filter);
        builder.push(" order by id");

        let mut items = builder
            .build_query_as::<ItemRow>()
            .fetch_all(&self.reader)
            .await?
            .into_iter()
            .map(ItemRecord::from)
            .collect::<Vec<_>>();

        if items.is_empty() {
            return Ok(Err(StockFailure::ItemNotFound));
        }

        query.field_for_sort.sort(&mut items, query.asc);
        Ok(Ok(items))
    }

    async fn income(
        &self,
        data: ItemData,
    ) -> Result<Result<ItemRecord<Self::ItemId>, StockFailure>, Self::Error> {
        if let Err(failure) = data.validate() {
            return Ok(Err(failure));
        }

        let mut tx = self.writer.begin().await?;

        let record = match find_identity(&mut tx, &data.color, data.cotton_percentage).await? {
            Some(mut item) => {
                if let Err(failure) = item.income(data.quantity) {
                    return Ok(Err(failure));
                }
                store_item(&mut tx, &item).await?;
                item
            }
            None => insert_item(&mut tx, &data).await?,
        };

        tx.commit().await?;
        Ok(Ok(record))
    }

    async fn outcome(
        &self,
        data: ItemData,
    ) -> Result<Result<ItemRecord<Self::ItemId>, StockFailure>, Self::Error> {
        if let Err(failure) = data.validate() {
            return Ok(Err(failure));
        }

        let mut tx = self.writer.begin().await?;

        let Some(mut item) = find_identity(&mut tx, &data.color, data.cotton_percentage).await?
        else {
            return Ok(Err(StockFailure::ItemNotFound));
        };

        // dropping the transaction rolls it back
        if let Err(failure) = item.outcome(data.quantity) {
            return Ok(Err(failure));
        }
        store_item(&mut tx, &item).await?;

        tx.commit().await?;
        Ok(Ok(item))
    }

    async fn update_item(
        &self,
        item_id: Self::ItemId,
        update: ItemUpdate,
    ) -> Result<Result<ItemRecord<Self::ItemId>, StockFailure>, Self::Error> {
        let mut tx = self.writer.begin().await?;

        let Some(mut item) = find_id(&mut tx, item_id).await? else {
            return Ok(Err(StockFailure::ItemNotFound));
        };

        if !update.is_empty() {
            item.apply(update);
            store_item(&mut tx, &item).await?;
        }

        tx.commit().await?;
        Ok(Ok(item))
    }

    async fn import_batch(
        &self,
        rows: Vec<ItemData>,
    ) -> Result<Result<ImportSummary, StockFailure>, Self::Error> {
        if let Some(failure) = rows.iter().find_map(|row| row.validate().err()) {
            return Ok(Err(StockFailure::InvalidCsvFile(failure.to_string())));
        }

        let mut tx = self.writer.begin().await?;
        let mut summary = ImportSummary::default();
        let mut staged = Vec::new();

        // Existing items are incremented as we go. New rows are only
        // staged, so they are never matched by later rows of the same batch.
        for row in rows {
            match find_identity(&mut tx, &row.color, row.cotton_percentage).await? {
                Some(mut item) => {
                    if let Err(failure) = item.income(row.quantity) {
                        return Ok(Err(failure));
                    }
                    store_item(&mut tx, &item).await?;
                    summary.updated += 1;
                }
                None => staged.push(row),
            }
        }

        for chunk in staged.chunks(BULK_INSERT_ROWS) {
            let mut builder =
                QueryBuilder::<Sqlite>::new("insert into item (color, cotton_percentage, quantity) ");
            builder.push_values(chunk, |mut b, row| {
                b.push_bind(row.color.as_str())
                    .push_bind(row.cotton_percentage)
                    .push_bind(row.quantity);
            });
            builder.build().execute(&mut *tx).await?;
        }
        summary.created = staged.len();

        tx.commit().await?;
        Ok(Ok(summary))
    }
}

/// Translate the filter into `and ...` clauses on the query.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: ItemFilter) {
    if let Some(color) = filter.color {
        builder.push(" and color = ").push_bind(color);
    }

    match filter.composition {
        Some(CompositionFilter::Equal(value)) => {
            builder.push(" and cotton_percentage = ").push_bind(value);
        }
        Some(CompositionFilter::LessThan(value)) => {
            builder.push(" and cotton_percentage < ").push_bind(value);
        }
        Some(CompositionFilter::MoreThan(value)) => {
            builder.push(" and cotton_percentage > ").push_bind(value);
        }
        Some(CompositionFilter::Between(lo, hi)) => {
            builder
                .push(" and cotton_percentage between ")
                .push_bind(lo)
                .push(" and ")
                .push_bind(hi);
        }
        None => {}
    }
}

async fn find_identity(
    conn: &mut SqliteConnection,
    color: &str,
    cotton_percentage: f64,
) -> Result<Option<ItemRecord<ItemId>>, sqlx::Error> {
    // several rows may share an identity after a batch import; the oldest wins
    let row = sqlx::query_as::<_, ItemRow>(
        r#"
        select
            id, color, cotton_percentage, quantity
        from
            item
        where
            color = $1
        and
            cotton_percentage = $2
        order by
            id
        limit 1
        "#,
    )
    .bind(color)
    .bind(cotton_percentage)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(Into::into))
}

async fn find_id(
    conn: &mut SqliteConnection,
    item_id: ItemId,
) -> Result<Option<ItemRecord<ItemId>>, sqlx::Error> {
    let row = sqlx::query_as::<_, ItemRow>(
        r#"
        select
            id, color, cotton_percentage, quantity
        from
            item
        where
            id = $1
        "#,
    )
    .bind(item_id)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(Into::into))
}

async fn insert_item(
    conn: &mut SqliteConnection,
    data: &ItemData,
) -> Result<ItemRecord<ItemId>, sqlx::Error> {
    let row = sqlx::query_as::<_, ItemRow>(
        r#"
        insert into
            item (color, cotton_percentage, quantity)
        values
            ($1, $2, $3)
        returning
            id, color, cotton_percentage, quantity
        "#,
    )
    .bind(&data.color)
    .bind(data.cotton_percentage)
    .bind(data.quantity)
    .fetch_one(conn)
    .await?;

    Ok(row.into())
}

async fn store_item(
    conn: &mut SqliteConnection,
    item: &ItemRecord<ItemId>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        update
            item
        set
            color = $1,
            cotton_percentage = $2,
            quantity = $3
        where
            id = $4
        "#,
    )
    .bind(&item.color)
    .bind(item.cotton_percentage)
    .bind(item.quantity)
    .bind(item.id)
    .execute(conn)
    .await?;

    Ok(())
}
