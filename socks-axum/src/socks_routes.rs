//! REST API endpoints for the sock inventory.
//!
//! This module provides the filtered listing of the inventory, the stock
//! movements (income, outcome and CSV batches) and partial correction of
//! individual items.

use crate::ApiApplication;
use aide::axum::{
    ApiRouter,
    routing::{get, post, put},
};
use axum::{
    Json,
    extract::{Multipart, Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::Query;
use socks_core::{
    models::{
        ImportSummary, ItemData, ItemQuery, ItemQueryResponse, ItemRecord, ItemUpdate,
        StockFailure, read_batch,
    },
    ports::{Application, InventoryRepository as _, Repository},
};
use std::fmt::Display;
use tracing::{Level, event};

type ItemIdOf<T> = <<T as Application>::Repository as Repository>::ItemId;

/// The name of the multipart field carrying the CSV file.
const FILE_FIELD: &str = "file";

/// Creates a router with the inventory endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/", get(query_socks::<T>), |route| route.tag("socks"))
        .api_route_with("/income", post(income::<T>), |route| route.tag("stock"))
        .api_route_with("/outcome", post(outcome::<T>), |route| route.tag("stock"))
        .api_route_with("/batch", post(upload_batch::<T>), |route| {
            route.tag("stock")
        })
        .api_route_with("/{item_id}", put(update_sock::<T>), |route| {
            route.tag("socks")
        })
}

/// Path parameter for item-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the item
    item_id: T,
}

/// Map a domain failure to its response.
fn rejected(failure: StockFailure) -> (StatusCode, String) {
    event!(Level::WARN, failure = failure.to_string());
    let status = match failure {
        StockFailure::ItemNotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, failure.to_string())
}

/// Map an unreadable request body to a bad request.
fn malformed(rejection: JsonRejection) -> (StatusCode, String) {
    let body = rejection.body_text();
    event!(Level::WARN, rejection = body.as_str(), "malformed body");
    (StatusCode::BAD_REQUEST, body)
}

/// Log an infrastructure error and hide it behind a generic response.
fn unexpected(err: impl Display, context: &str) -> (StatusCode, String) {
    event!(Level::ERROR, err = err.to_string(), context);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "something went wrong".to_string(),
    )
}

/// List the socks in stock.
///
/// Filters by exact color and/or by comparing the cotton percentage
/// (`equal`, `lessThan`, `moreThan` with one `cottonPercentage` value,
/// `between` with two, in any order). Results are ordered by `fieldForSort`
/// (`NOTHING`, `COLOR`, `COTTON_PERCENTAGE`), ascending unless `asc=false`.
///
/// # Returns
///
/// - `200 OK`: The matching socks
/// - `400 Bad Request`: The comparison and the number of values do not fit
/// - `404 Not Found`: No socks match
/// - `500 Internal Server Error`: Database query failed
async fn query_socks<T: ApiApplication>(
    State(app): State<T>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<ItemQueryResponse<ItemRecord<ItemIdOf<T>>>>, (StatusCode, String)> {
    event!(Level::INFO, ?query, "query socks");

    let socks = app
        .database()
        .query_items(query)
        .await
        .map_err(|err| unexpected(err, "failed to query socks"))?
        .map_err(rejected)?;

    Ok(Json(ItemQueryResponse { socks }))
}

/// Register incoming socks.
///
/// Adds the quantity to the socks with the same color and cotton percentage,
/// or registers them if they were not stocked before.
///
/// # Returns
///
/// - `201 Created`: The resulting stock of these socks
/// - `400 Bad Request`: The body is malformed, the cotton percentage is outside (0, 100] or the quantity is not positive
/// - `500 Internal Server Error`: Database operation failed
async fn income<T: ApiApplication>(
    State(app): State<T>,
    body: Result<Json<ItemData>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemRecord<ItemIdOf<T>>>), (StatusCode, String)> {
    let Json(data) = body.map_err(malformed)?;
    event!(Level::INFO, ?data, "income");

    let record = app
        .database()
        .income(data)
        .await
        .map_err(|err| unexpected(err, "failed to register income"))?
        .map_err(rejected)?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Register outgoing socks.
///
/// # Returns
///
/// - `200 OK`: The remaining stock of these socks
/// - `400 Bad Request`: Not enough socks in stock, or a malformed or invalid body
/// - `404 Not Found`: No socks with this color and cotton percentage
/// - `500 Internal Server Error`: Database operation failed
async fn outcome<T: ApiApplication>(
    State(app): State<T>,
    body: Result<Json<ItemData>, JsonRejection>,
) -> Result<Json<ItemRecord<ItemIdOf<T>>>, (StatusCode, String)> {
    let Json(data) = body.map_err(malformed)?;
    event!(Level::INFO, ?data, "outcome");

    let record = app
        .database()
        .outcome(data)
        .await
        .map_err(|err| unexpected(err, "failed to register outcome"))?
        .map_err(rejected)?;

    Ok(Json(record))
}

/// Correct an item.
///
/// Any of `color`, `cottonPercentage` and `quantity` may be given as query
/// parameters; the others are left unchanged.
///
/// # Returns
///
/// - `200 OK`: The updated item
/// - `404 Not Found`: Item does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn update_sock<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { item_id }): Path<Id<ItemIdOf<T>>>,
    Query(update): Query<ItemUpdate>,
) -> Result<Json<ItemRecord<ItemIdOf<T>>>, (StatusCode, String)> {
    event!(Level::INFO, %item_id, ?update, "update socks");

    let record = app
        .database()
        .update_item(item_id.clone(), update)
        .await
        .map_err(|err| unexpected(err, &format!("failed to update item {}", item_id)))?
        .map_err(rejected)?;

    Ok(Json(record))
}

/// Load a batch of socks from a CSV file.
///
/// The file is sent as the multipart field `file` and must start with the
/// header `color,cottonPercentage,quantity`. Rows matching stocked socks
/// increment them; the others are registered as new socks. A single bad row
/// rejects the whole file.
///
/// # Returns
///
/// - `200 OK`: How many rows were merged and how many created
/// - `400 Bad Request`: The file is missing or malformed
/// - `500 Internal Server Error`: Database operation failed
async fn upload_batch<T: ApiApplication>(
    State(app): State<T>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, (StatusCode, String)> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| (err.status(), err.body_text()))?
    {
        if field.name() == Some(FILE_FIELD) {
            file = Some(
                field
                    .bytes()
                    .await
                    .map_err(|err| (err.status(), err.body_text()))?,
            );
            break;
        }
    }

    let file = file.ok_or_else(|| {
        rejected(StockFailure::InvalidCsvFile(format!(
            "missing multipart field `{FILE_FIELD}`"
        )))
    })?;
    event!(Level::INFO, bytes = file.len(), "upload batch");

    let rows = read_batch(file.as_ref()).map_err(rejected)?;

    let summary = app
        .database()
        .import_batch(rows)
        .await
        .map_err(|err| unexpected(err, "failed to import batch"))?
        .map_err(rejected)?;

    Ok(Json(summary))
}
