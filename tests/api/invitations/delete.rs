use foyer_shared::{
    invitations::{InvitationResponse, InvitationValidationResponse},
    AckResponse,
};
use uuid::Uuid;

use crate::helpers::spawn_app;

#[tokio::test]
async fn delete_removes_the_invitation_entirely() {
    // Arrange
    let app = spawn_app().await;
    let invitation = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id }))
        .await;

    // Act
    let response = app
        .delete_invitation(invitation.id.to_string(), Some(app.manager_token()))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert!(response.json::<AckResponse>().await.unwrap().success);

    let invitations = app.group_invitations().await;
    assert!(invitations.is_empty());

    let validation = app
        .get_validate_invitation(invitation.token.clone())
        .await
        .json::<InvitationValidationResponse>()
        .await
        .unwrap();
    assert!(!validation.valid);
    assert_eq!(
        Some("Invalid invitation token".to_string()),
        validation.message
    );
}

#[tokio::test]
async fn delete_is_permitted_regardless_of_lifecycle_state() {
    // Arrange
    let app = spawn_app().await;
    let invitation = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id }))
        .await;

    let response = app
        .post_revoke_invitation(invitation.id.to_string(), Some(app.manager_token()))
        .await;
    assert_eq!(200, response.status().as_u16());

    // Act
    let response = app
        .delete_invitation(invitation.id.to_string(), Some(app.manager_token()))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert!(app.group_invitations().await.is_empty());
}

#[tokio::test]
async fn deleted_tokens_are_never_reassigned() {
    // Arrange
    let app = spawn_app().await;
    let deleted = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id }))
        .await;

    let response = app
        .delete_invitation(deleted.id.to_string(), Some(app.manager_token()))
        .await;
    assert_eq!(200, response.status().as_u16());

    // Act
    let replacement = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id }))
        .await;

    // Assert
    assert_ne!(deleted.token, replacement.token);
}

#[tokio::test]
async fn deleting_twice_returns_404() {
    // Arrange
    let app = spawn_app().await;
    let invitation = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id }))
        .await;

    let response = app
        .delete_invitation(invitation.id.to_string(), Some(app.manager_token()))
        .await;
    assert_eq!(200, response.status().as_u16());

    // Act
    let response = app
        .delete_invitation(invitation.id.to_string(), Some(app.manager_token()))
        .await;

    // Assert
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn delete_returns_404_for_unknown_invitation() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .delete_invitation(Uuid::new_v4().to_string(), Some(app.admin_token()))
        .await;

    // Assert
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn delete_returns_403_when_caller_does_not_manage_the_group() {
    // Arrange
    let app = spawn_app().await;
    let response = app
        .post_create_invitation(
            serde_json::json!({ "group_id": app.other_group.id }),
            Some(app.admin_token()),
        )
        .await;
    let invitation = response.json::<InvitationResponse>().await.unwrap();

    // Act
    let response = app
        .delete_invitation(invitation.id.to_string(), Some(app.manager_token()))
        .await;

    // Assert
    assert_eq!(403, response.status().as_u16());
}

#[tokio::test]
async fn delete_returns_401_for_missing_or_invalid_bearer_token() {
    // Arrange
    let app = spawn_app().await;
    let invitation = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id }))
        .await;

    for token in [None, Some("foo".to_string())] {
        // Act
        let response = app.delete_invitation(invitation.id.to_string(), token).await;

        // Assert
        assert_eq!(401, response.status().as_u16());
    }
}
