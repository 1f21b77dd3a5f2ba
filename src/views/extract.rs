use std::collections::BTreeMap;

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::de::value::{Error as ValueError, MapDeserializer};
use serde::de::DeserializeOwned;

/// A urlencoded form body where a repeated field keeps its last value.
///
/// Browsers and scripted clients may send `name=a&name=b`; the plain
/// [`Form`] extractor rejects that before the handler can re-render the
/// form with field errors.
#[derive(Debug)]
pub struct FormData<T>(pub T);

impl<T, S> FromRequest<S> for FormData<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let fields: BTreeMap<String, String> = pairs.into_iter().collect();
        T::deserialize(MapDeserializer::<_, ValueError>::new(fields.into_iter()))
            .map(FormData)
            .map_err(|err| (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response())
    }
}
