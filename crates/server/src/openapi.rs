use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    /// Present on schema validation failures.
    pub fields: Option<Vec<FieldErrorDoc>>,
}

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct RegisterRequestDoc { pub email: String, pub name: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequestDoc { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct UserDoc { pub email: String, pub name: String }

#[derive(ToSchema)]
pub struct UserResponseDoc { pub user: UserDoc }

#[derive(ToSchema)]
pub struct NewContactDoc {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct ContactPatchDoc {
    pub id: Uuid,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    /// An empty string removes the stored email.
    pub email: Option<String>,
}

/// Contact as serialised on the wire.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDoc {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::contacts::read,
        crate::routes::contacts::create,
        crate::routes::contacts::update,
        crate::routes::contacts::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            FieldErrorDoc,
            MessageDoc,
            RegisterRequestDoc,
            LoginRequestDoc,
            UserDoc,
            UserResponseDoc,
            NewContactDoc,
            ContactPatchDoc,
            ContactDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "contacts")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = json["paths"].as_object().unwrap();
        for p in ["/health", "/api/register", "/api/login", "/api/logout", "/api/me", "/api/contacts"] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        let contacts = &paths["/api/contacts"];
        for verb in ["get", "post", "put", "delete"] {
            assert!(contacts.get(verb).is_some(), "missing {verb}");
        }
    }
}
