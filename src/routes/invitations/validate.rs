use actix_http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use foyer_db::groups::queries::get_group_with_id;
use foyer_db::invitations::queries::get_invitation_with_token;
use foyer_shared::{
    error_chain_fmt, invitations::InvitationValidationResponse, ErrorDetail,
};
use sqlx::SqlitePool;

use crate::routes::storage::{storage_error, StorageError};

#[derive(thiserror::Error)]
pub enum ValidateError {
    #[error(transparent)]
    StorageError(#[from] StorageError),
}

impl std::fmt::Debug for ValidateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ValidateError {
    fn status_code(&self) -> actix_http::StatusCode {
        match self {
            ValidateError::StorageError(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(self.to_string()))
    }
}

///
/// Public validation endpoint, no authentication required.
///
/// Performs only reads and never consumes a use. A bad or unknown token is
/// reported as `valid: false` with a message, never as an error status.
///
#[tracing::instrument(name = "Validate invitation token", skip(token, pool))]
pub async fn validate(
    token: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, ValidateError> {
    let invitation = match get_invitation_with_token(&token, &pool)
        .await
        .map_err(storage_error(
            "Failed to retrieve the invitation from the database.",
        ))?
    {
        Some(invitation) => invitation,
        None => {
            return Ok(HttpResponse::Ok()
                .json(InvitationValidationResponse::invalid("Invalid invitation token")));
        }
    };

    if let Some(reason) = invitation.deny_reason(Utc::now()) {
        return Ok(HttpResponse::Ok().json(InvitationValidationResponse::invalid(format!(
            "This invitation is {}",
            reason
        ))));
    }

    let group_name = get_group_with_id(invitation.group_id, &pool)
        .await
        .map_err(storage_error(
            "Failed to retrieve the group from the database.",
        ))?
        .map(|group| group.name)
        .unwrap_or_else(|| "Unknown Group".to_string());

    Ok(HttpResponse::Ok().json(InvitationValidationResponse::valid(
        invitation.group_id,
        group_name,
    )))
}
