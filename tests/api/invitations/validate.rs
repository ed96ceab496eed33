use chrono::{Duration, Utc};
use foyer_shared::invitations::InvitationValidationResponse;

use crate::helpers::spawn_app;

#[tokio::test]
async fn validate_returns_valid_with_group_details_for_a_redeemable_token() {
    // Arrange
    let app = spawn_app().await;
    let invitation = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id, "max_uses": 3 }))
        .await;

    // Act
    let validation = app
        .get_validate_invitation(invitation.token.clone())
        .await
        .json::<InvitationValidationResponse>()
        .await
        .unwrap();

    // Assert
    assert!(validation.valid);
    assert_eq!(Some(app.group.id), validation.group_id);
    assert_eq!(Some("Support Team".to_string()), validation.group_name);
    assert_eq!(Some("Invitation is valid".to_string()), validation.message);
}

#[tokio::test]
async fn validate_returns_invalid_for_a_token_that_was_never_issued() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .get_validate_invitation("this-token-was-never-issued".to_string())
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());

    let validation = response
        .json::<InvitationValidationResponse>()
        .await
        .unwrap();
    assert!(!validation.valid);
    assert_eq!(None, validation.group_id);
    assert_eq!(
        Some("Invalid invitation token".to_string()),
        validation.message
    );
}

#[tokio::test]
async fn validate_never_consumes_a_use() {
    // Arrange
    let app = spawn_app().await;
    let invitation = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id, "max_uses": 1 }))
        .await;

    // Act
    for _ in 0..3 {
        let validation = app
            .get_validate_invitation(invitation.token.clone())
            .await
            .json::<InvitationValidationResponse>()
            .await
            .unwrap();

        assert!(validation.valid);
    }

    // Assert
    let invitations = app.group_invitations().await;
    assert_eq!(0, invitations[0].current_uses);
}

#[tokio::test]
async fn validate_reports_expired_even_with_remaining_uses() {
    // Arrange
    let app = spawn_app().await;
    let invitation = app
        .create_invitation(serde_json::json!({
            "group_id": app.group.id,
            "max_uses": 5,
            "expires_in_hours": 1,
        }))
        .await;

    // Backdate the expiry to the past
    sqlx::query("UPDATE invitations SET expires_at = $1 WHERE id = $2")
        .bind(Utc::now() - Duration::hours(1))
        .bind(invitation.id)
        .execute(&app.db_pool)
        .await
        .unwrap();

    // Act
    let validation = app
        .get_validate_invitation(invitation.token.clone())
        .await
        .json::<InvitationValidationResponse>()
        .await
        .unwrap();

    // Assert
    assert!(!validation.valid);
    assert_eq!(
        Some("This invitation is expired".to_string()),
        validation.message
    );
}

#[tokio::test]
async fn validate_reports_revoked_even_with_remaining_uses() {
    // Arrange
    let app = spawn_app().await;
    let invitation = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id, "max_uses": 5 }))
        .await;

    let response = app
        .post_revoke_invitation(invitation.id.to_string(), Some(app.manager_token()))
        .await;
    assert_eq!(200, response.status().as_u16());

    // Act
    let validation = app
        .get_validate_invitation(invitation.token.clone())
        .await
        .json::<InvitationValidationResponse>()
        .await
        .unwrap();

    // Assert
    assert!(!validation.valid);
    assert_eq!(
        Some("This invitation is revoked".to_string()),
        validation.message
    );
}

#[tokio::test]
async fn validate_requires_no_authorization_header() {
    // Arrange
    let app = spawn_app().await;
    let invitation = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id }))
        .await;

    // Act: plain client without any bearer token
    let response = reqwest::Client::new()
        .get(&format!(
            "{}/invitations/validate/{}",
            &app.address, invitation.token
        ))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(200, response.status().as_u16());
}
