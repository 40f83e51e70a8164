//! Service layer for the users API.
//! - `users`: record store accessor (`UserStore` and its backends) and the
//!   two request handlers, independent of any web framework.
//! - `storage`: reusable file-backed map store.
//! - `errors`: failure kinds shared by stores and handlers.

pub mod errors;
pub mod storage;
pub mod users;
#[cfg(test)]
pub mod test_support;
