//! API endpoint integration tests
//!
//! Drives the full router over the in-memory backend: albums, laminas,
//! completion statistics. The `postgres` module exercises the SQL
//! repositories when `TEST_DATABASE_URL` is set.

#![allow(dead_code)]

mod albums;
mod common;
mod laminas;
mod postgres;
mod statistics;
