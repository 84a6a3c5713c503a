#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the inventory service.
///
/// This module contains the inventory record, the boundary value used for
/// income and outcome requests, the query parameters used for filtered
/// listing, and the reader for CSV batches.
///
/// The models carry the stock rules themselves (non-negative quantities,
/// filter validation, sorting), so that every storage adapter enforces them
/// identically.
pub mod models;

/// Interface traits for the inventory service.
///
/// These traits are the "ports" between the domain and its adapters
/// (databases, HTTP servers) and do not prescribe any implementation.
pub mod ports;
