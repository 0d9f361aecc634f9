use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub sub: String,
    /// Platform user id, when the token carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub roles: Vec<String>,
}
