//! Request shapes checked by the gateway before forwarding

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{api::AppJson, error::AppError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

fn end_after_start(booking: &NewBooking) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (booking.start, booking.end) {
        if end <= start {
            let mut error = ValidationError::new("end_before_start");
            error.message = Some("end must be after start".into());
            return Err(error);
        }
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(required(message = "name is required"), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(
        required(message = "email is required"),
        custom(function = "not_blank"),
        email(message = "Invalid email format")
    )]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UserPatch {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    #[validate(required(message = "name is required"), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(required(message = "description is required"), custom(function = "not_blank"))]
    pub description: Option<String>,
    #[validate(required(message = "available is required"))]
    pub available: Option<bool>,
    pub request_id: Option<i64>,
}

/// Partial item update, forwarded as is
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewComment {
    #[validate(required(message = "text is required"), custom(function = "not_blank"))]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "end_after_start"))]
pub struct NewBooking {
    #[validate(required(message = "itemId is required"))]
    pub item_id: Option<i64>,
    #[validate(required(message = "start is required"))]
    pub start: Option<NaiveDateTime>,
    #[validate(required(message = "end is required"))]
    pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewItemRequest {
    #[validate(required(message = "description is required"), custom(function = "not_blank"))]
    pub description: Option<String>,
}

/// JSON body that must pass `Validate` before the handler runs
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(value) = AppJson::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|errors| AppError::Validation(errors.to_string()))?;
        Ok(ValidatedJson(value))
    }
}
