use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CreateUserRequest { pub name: String, pub email: String }

#[derive(ToSchema)]
pub struct CreateUserResponse { pub id: String }

#[derive(ToSchema)]
pub struct UserDoc { pub id: String, pub name: String, pub email: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create_user,
        crate::routes::users::get_user_by_id,
    ),
    components(
        schemas(
            HealthResponse,
            CreateUserRequest,
            CreateUserResponse,
            UserDoc,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_user_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/user"));
        assert!(doc.paths.paths.contains_key("/user/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
