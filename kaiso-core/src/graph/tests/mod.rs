//! Unit tests for the HNSW adjacency storage.

mod growth;
mod params;
