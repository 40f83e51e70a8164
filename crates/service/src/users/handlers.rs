use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::api::{ApiRequest, ApiResponse};
use super::domain::{CreateUserInput, CreatedUser, User};
use super::repository::UserStore;
use crate::errors::ServiceError;

pub const USER_NOT_FOUND: &str = "User not found";

/// Maps handler failures to status codes and response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPolicy {
    /// Malformed input and store failures both answer 500. When false,
    /// malformed input answers 400 and store failures 502.
    pub legacy_status_codes: bool,
    /// Echo error text in 5xx bodies; otherwise they read "Internal Server Error".
    pub expose_error_detail: bool,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self { legacy_status_codes: true, expose_error_detail: true }
    }
}

impl ErrorPolicy {
    pub fn status_for(&self, err: &ServiceError) -> u16 {
        match (err, self.legacy_status_codes) {
            (ServiceError::NotFound(_), _) => 404,
            (ServiceError::MalformedInput(_), true) => 500,
            (ServiceError::MalformedInput(_), false) => 400,
            (ServiceError::Store(_), true) => 500,
            (ServiceError::Store(_), false) => 502,
        }
    }

    pub fn respond(&self, err: &ServiceError) -> ApiResponse {
        let status = self.status_for(err);
        if status >= 500 && !self.expose_error_detail {
            return ApiResponse::error(status, "Internal Server Error");
        }
        ApiResponse::error(status, err.to_string())
    }
}

/// The CreateUser and GetUserById operations over an injected store.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::users::{ApiRequest, UserHandlers, repo::MemoryUserStore};
/// let handlers = UserHandlers::new(Arc::new(MemoryUserStore::new()));
/// let created = tokio_test::block_on(handlers.create_user(
///     &ApiRequest::new().with_body(r#"{"name":"Ada","email":"ada@example.com"}"#),
/// ));
/// assert_eq!(created.status_code, 200);
/// let id = created.body_json().unwrap()["id"].as_str().unwrap().to_string();
/// let found = tokio_test::block_on(handlers.get_user_by_id(&ApiRequest::new().with_path_parameter("id", id)));
/// assert_eq!(found.status_code, 200);
/// ```
#[derive(Clone)]
pub struct UserHandlers {
    store: Arc<dyn UserStore>,
    policy: ErrorPolicy,
}

impl UserHandlers {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store, policy: ErrorPolicy::default() }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ErrorPolicy { self.policy }

    /// Decode `{name, email}`, assign a fresh id, persist, answer `{"id": ...}`.
    #[instrument(name = "create_user", skip_all)]
    pub async fn create_user(&self, req: &ApiRequest) -> ApiResponse {
        match self.try_create(req).await {
            Ok(created) => {
                info!(user_id = %created.id, "user_created");
                ApiResponse::json(200, &created)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Answer the stored record, or 404 `{"error": "User not found"}`.
    #[instrument(name = "get_user_by_id", skip_all, fields(user_id = req.path_parameter("id").unwrap_or_default()))]
    pub async fn get_user_by_id(&self, req: &ApiRequest) -> ApiResponse {
        match self.try_get(req).await {
            Ok(user) => ApiResponse::json(200, &user),
            Err(e) => self.fail(e),
        }
    }

    async fn try_create(&self, req: &ApiRequest) -> Result<CreatedUser, ServiceError> {
        let body = req
            .body
            .as_deref()
            .ok_or_else(|| ServiceError::MalformedInput("request body is required".into()))?;
        let input = CreateUserInput::from_json(body)?;
        let user = User::new(input);
        let created = CreatedUser { id: user.id.clone() };
        self.store.put(user).await?;
        Ok(created)
    }

    async fn try_get(&self, req: &ApiRequest) -> Result<User, ServiceError> {
        let id = req
            .path_parameter("id")
            .ok_or_else(|| ServiceError::MalformedInput("missing path parameter: id".into()))?;
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(USER_NOT_FOUND.into()))
    }

    fn fail(&self, err: ServiceError) -> ApiResponse {
        match &err {
            ServiceError::NotFound(_) => info!("user not found"),
            ServiceError::MalformedInput(msg) => warn!(error = %msg, "rejected malformed input"),
            ServiceError::Store(msg) => error!(error = %msg, "user store failure"),
        }
        self.policy.respond(&err)
    }
}
