use actix_http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use foyer_db::invitations::queries::{delete_invitation, get_invitation_with_id};
use foyer_shared::{error_chain_fmt, jwt::AuthorizationService, AckResponse, ErrorDetail};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::routes::storage::{storage_error, StorageError};

#[derive(thiserror::Error)]
pub enum DeleteError {
    #[error("Invitation not found")]
    NotFoundError,
    #[error("You do not have permission to delete this invitation")]
    ForbiddenError,
    #[error(transparent)]
    StorageError(#[from] StorageError),
}

impl std::fmt::Debug for DeleteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for DeleteError {
    fn status_code(&self) -> actix_http::StatusCode {
        match self {
            DeleteError::NotFoundError => StatusCode::NOT_FOUND,
            DeleteError::ForbiddenError => StatusCode::FORBIDDEN,
            DeleteError::StorageError(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(self.to_string()))
    }
}

#[tracing::instrument(name = "Delete invitation", skip(pool, auth), fields(user_id = %auth.claims.id, user_email = %auth.claims.email))]
pub async fn delete(
    invitation_id: web::Path<Uuid>,
    pool: web::Data<SqlitePool>,
    auth: AuthorizationService,
) -> Result<HttpResponse, DeleteError> {
    let invitation = get_invitation_with_id(*invitation_id, &pool)
        .await
        .map_err(storage_error(
            "Failed to retrieve the invitation from the database.",
        ))?
        .ok_or(DeleteError::NotFoundError)?;

    if !auth.claims.can_manage_group(invitation.group_id) {
        return Err(DeleteError::ForbiddenError);
    }

    delete_invitation(&pool, invitation.id)
        .await
        .map_err(storage_error(
            "Failed to delete the invitation from the database.",
        ))?;

    Ok(HttpResponse::Ok().json(AckResponse {
        success: true,
        message: "Invitation deleted successfully".to_string(),
    }))
}
