use std::convert::{TryFrom, TryInto};

use actix_http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use foyer_db::groups::queries::get_group_with_id;
use foyer_db::invitations::{
    models::{ExpiresInHours, InvitationNote, MaxUses, NewInvitation},
    queries::insert_invitation,
};
use foyer_shared::{error_chain_fmt, jwt::AuthorizationService, ErrorDetail};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    application::ApplicationBaseUrl,
    routes::storage::{storage_error, StorageError},
    token,
};

/// How often a store-detected token collision triggers regeneration.
const TOKEN_INSERT_ATTEMPTS: u32 = 3;

#[derive(serde::Deserialize)]
pub struct BodyData {
    group_id: Uuid,
    max_uses: Option<i64>,
    expires_in_hours: Option<i64>,
    note: Option<String>,
}

impl TryFrom<BodyData> for NewInvitation {
    type Error = String;

    fn try_from(value: BodyData) -> Result<Self, Self::Error> {
        let max_uses = value.max_uses.map(MaxUses::parse).transpose()?;
        let expires_in_hours = value.expires_in_hours.map(ExpiresInHours::parse).transpose()?;
        let note = value.note.map(InvitationNote::parse).transpose()?;

        Ok(Self {
            group_id: value.group_id,
            max_uses,
            expires_in_hours,
            note,
        })
    }
}

#[derive(thiserror::Error)]
pub enum CreateError {
    #[error("{0}")]
    ValidationError(String),
    #[error("You do not have permission to create invitations for this group")]
    ForbiddenError,
    #[error("Group not found")]
    GroupNotFoundError,
    #[error(transparent)]
    StorageError(#[from] StorageError),
}

impl std::fmt::Debug for CreateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for CreateError {
    fn status_code(&self) -> actix_http::StatusCode {
        match self {
            CreateError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CreateError::ForbiddenError => StatusCode::FORBIDDEN,
            CreateError::GroupNotFoundError => StatusCode::NOT_FOUND,
            CreateError::StorageError(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(self.to_string()))
    }
}

#[tracing::instrument(name = "Create a new invitation", skip(body, pool, base_url, auth), fields(user_id = %auth.claims.id, user_email = %auth.claims.email, group_id = %body.group_id))]
pub async fn create(
    body: web::Json<BodyData>,
    pool: web::Data<SqlitePool>,
    base_url: web::Data<ApplicationBaseUrl>,
    auth: AuthorizationService,
) -> Result<HttpResponse, CreateError> {
    let group_id = body.group_id;
    let new_invitation: NewInvitation = body.0.try_into().map_err(CreateError::ValidationError)?;

    if !auth.claims.can_manage_group(group_id) {
        return Err(CreateError::ForbiddenError);
    }

    let group = get_group_with_id(group_id, &pool)
        .await
        .map_err(storage_error(
            "Failed to retrieve the group from the database.",
        ))?
        .ok_or(CreateError::GroupNotFoundError)?;

    let mut attempts = 0;
    let invitation = loop {
        attempts += 1;

        let token = token::generate_invitation_token();

        let mut transaction = pool.begin().await.map_err(storage_error(
            "Failed to acquire a database connection from the pool.",
        ))?;

        match insert_invitation(&mut transaction, &new_invitation, auth.claims.id, &token).await {
            Ok(invitation) => {
                transaction.commit().await.map_err(storage_error(
                    "Failed to commit SQL transaction to store a new invitation.",
                ))?;

                break invitation;
            }
            Err(error) if attempts < TOKEN_INSERT_ATTEMPTS && is_unique_violation(&error) => {
                // Token collided with an existing one, generate a fresh one.
                continue;
            }
            Err(error) => {
                return Err(storage_error("Failed to insert new invitation in the database.")(
                    error,
                )
                .into());
            }
        }
    };

    let invitation_url = token::invitation_url(&base_url.0, &invitation.token);
    let response = invitation.into_response(group.name, invitation_url, Utc::now());

    Ok(HttpResponse::Created().json(response))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|error| error.is_unique_violation())
        .unwrap_or(false)
}
