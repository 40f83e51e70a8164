//! sea-orm entities and connection helpers for the relational user store.

pub mod db;
pub mod user;
