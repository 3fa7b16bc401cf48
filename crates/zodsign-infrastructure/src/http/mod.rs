mod client;

pub use client::{HttpClient, PageResponse};
