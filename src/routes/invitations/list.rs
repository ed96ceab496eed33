use actix_http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use foyer_db::groups::{
    models::GroupModel,
    queries::{get_group_with_id, get_groups},
};
use foyer_db::invitations::queries::get_invitations_for_group;
use foyer_shared::{
    error_chain_fmt, invitations::InvitationResponse, jwt::AuthorizationService, ErrorDetail,
};
use sqlx::SqlitePool;

use crate::{
    application::ApplicationBaseUrl,
    routes::storage::{storage_error, StorageError},
    token,
};

#[derive(thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    StorageError(#[from] StorageError),
}

impl std::fmt::Debug for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ListError {
    fn status_code(&self) -> actix_http::StatusCode {
        match self {
            ListError::StorageError(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(self.to_string()))
    }
}

#[tracing::instrument(name = "List accessible invitations", skip(pool, base_url, auth), fields(user_id = %auth.claims.id, user_email = %auth.claims.email))]
pub async fn list(
    pool: web::Data<SqlitePool>,
    base_url: web::Data<ApplicationBaseUrl>,
    auth: AuthorizationService,
) -> Result<HttpResponse, ListError> {
    // Admins see every group, everyone else their managed groups.
    let groups: Vec<GroupModel> = if auth.claims.is_admin() {
        get_groups(&pool)
            .await
            .map_err(storage_error("Failed to retrieve groups from the database."))?
    } else {
        let mut groups = Vec::with_capacity(auth.claims.managed_groups.len());

        for group_id in &auth.claims.managed_groups {
            if let Some(group) = get_group_with_id(*group_id, &pool)
                .await
                .map_err(storage_error(
                    "Failed to retrieve the group from the database.",
                ))?
            {
                groups.push(group);
            }
        }

        groups
    };

    let now = Utc::now();
    let mut invitations: Vec<InvitationResponse> = Vec::new();

    for group in groups {
        let group_invitations = get_invitations_for_group(group.id, &pool)
            .await
            .map_err(storage_error("Failed to get invitations for group."))?;

        invitations.extend(group_invitations.into_iter().map(|invitation| {
            let invitation_url = token::invitation_url(&base_url.0, &invitation.token);

            invitation.into_response(group.name.clone(), invitation_url, now)
        }));
    }

    Ok(HttpResponse::Ok().json(invitations))
}
