//! Users module: domain types, the record store accessor and the two
//! request handlers (CreateUser, GetUserById).

pub mod api;
pub mod domain;
pub mod handlers;
pub mod repo;
pub mod repository;

pub use api::{ApiRequest, ApiResponse};
pub use domain::User;
pub use handlers::{ErrorPolicy, UserHandlers};
pub use repository::UserStore;
