//! Talking to the catalog service: HTTP fetches and hyperlink handling.

pub mod client;
pub mod links;

pub use client::{collection_path, fetch_collection, fetch_resources, Fetcher, HttpFetcher};
pub use links::{absolute_url, resolve_link};
