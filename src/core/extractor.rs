use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON body extractor that reports rejections through `AppError`,
/// naming the payload type that failed (`CreateEventDto`, `UpdateEventDto`)
pub struct AppJson<T>(pub T);

/// Last path segment of `T`'s type name
fn payload_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection {
                payload: payload_name::<T>(),
                rejection,
            }),
        }
    }
}

pub struct AppJsonRejection {
    payload: &'static str,
    rejection: JsonRejection,
}

impl AppJsonRejection {
    fn message(&self) -> String {
        let payload = self.payload;
        match &self.rejection {
            JsonRejection::JsonDataError(err) => {
                format!("Invalid {payload}: {}", err.body_text())
            }
            JsonRejection::JsonSyntaxError(err) => {
                format!("Malformed JSON in {payload}: {}", err.body_text())
            }
            JsonRejection::MissingJsonContentType(_) => {
                format!("{payload} must be sent as application/json")
            }
            _ => format!("Failed to read {payload} body"),
        }
    }
}

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = self.message();
        tracing::debug!("Rejected request body: {}", message);
        AppError::BadRequest(message).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::events::dtos::CreateEventDto;

    #[test]
    fn test_payload_name_is_unqualified() {
        assert_eq!(payload_name::<CreateEventDto>(), "CreateEventDto");
    }
}
