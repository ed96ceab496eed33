use actix_http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use foyer_db::groups::queries::get_group_with_id;
use foyer_db::invitations::queries::get_invitations_for_group;
use foyer_shared::{
    error_chain_fmt, invitations::InvitationResponse, jwt::AuthorizationService, ErrorDetail,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    application::ApplicationBaseUrl,
    routes::storage::{storage_error, StorageError},
    token,
};

#[derive(thiserror::Error)]
pub enum GetForGroupError {
    #[error("You do not have permission to view invitations for this group")]
    ForbiddenError,
    #[error("Group not found")]
    GroupNotFoundError,
    #[error(transparent)]
    StorageError(#[from] StorageError),
}

impl std::fmt::Debug for GetForGroupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for GetForGroupError {
    fn status_code(&self) -> actix_http::StatusCode {
        match self {
            GetForGroupError::ForbiddenError => StatusCode::FORBIDDEN,
            GetForGroupError::GroupNotFoundError => StatusCode::NOT_FOUND,
            GetForGroupError::StorageError(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(self.to_string()))
    }
}

#[tracing::instrument(name = "Get group invitations", skip(pool, base_url, auth), fields(user_id = %auth.claims.id, user_email = %auth.claims.email))]
pub async fn get_for_group(
    group_id: web::Path<Uuid>,
    pool: web::Data<SqlitePool>,
    base_url: web::Data<ApplicationBaseUrl>,
    auth: AuthorizationService,
) -> Result<HttpResponse, GetForGroupError> {
    if !auth.claims.can_manage_group(*group_id) {
        return Err(GetForGroupError::ForbiddenError);
    }

    let group = get_group_with_id(*group_id, &pool)
        .await
        .map_err(storage_error(
            "Failed to retrieve the group from the database.",
        ))?
        .ok_or(GetForGroupError::GroupNotFoundError)?;

    let now = Utc::now();
    let invitations: Vec<InvitationResponse> = get_invitations_for_group(*group_id, &pool)
        .await
        .map_err(storage_error("Failed to get invitations for group."))?
        .into_iter()
        .map(|invitation| {
            let invitation_url = token::invitation_url(&base_url.0, &invitation.token);

            invitation.into_response(group.name.clone(), invitation_url, now)
        })
        .collect();

    Ok(HttpResponse::Ok().json(invitations))
}
