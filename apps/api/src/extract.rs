use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// JSON body extractor whose rejections (content type, syntax, shape) all
/// surface as `AppError::Validation`, i.e. a 422 failure envelope.
///
/// The body must be a JSON object. Derived struct visitors also accept
/// arrays by position, so the object is extracted first and `T` is built from it.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(object) = Json::<Map<String, Value>>::from_request(req, state).await?;
        let value = serde_json::from_value(Value::Object(object))
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(ValidatedJson(value))
    }
}
