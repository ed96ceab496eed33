use foyer_shared::invitations::InvitationResponse;
use uuid::Uuid;

use crate::helpers::spawn_app;

#[tokio::test]
async fn get_for_group_returns_invitations_in_creation_order() {
    // Arrange
    let app = spawn_app().await;
    let first = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id, "note": "first" }))
        .await;
    let second = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id, "note": "second" }))
        .await;
    let third = app
        .create_invitation(serde_json::json!({ "group_id": app.group.id, "note": "third" }))
        .await;

    // Act
    let invitations = app.group_invitations().await;

    // Assert
    assert_eq!(
        vec![first.id, second.id, third.id],
        invitations
            .iter()
            .map(|invitation| invitation.id)
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn get_for_group_excludes_invitations_of_other_groups() {
    // Arrange
    let app = spawn_app().await;
    app.create_invitation(serde_json::json!({ "group_id": app.group.id }))
        .await;

    let response = app
        .post_create_invitation(
            serde_json::json!({ "group_id": app.other_group.id }),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(201, response.status().as_u16());

    // Act
    let invitations = app.group_invitations().await;

    // Assert
    assert_eq!(1, invitations.len());
    assert_eq!(app.group.id, invitations[0].group_id);
}

#[tokio::test]
async fn get_for_group_returns_401_for_missing_or_invalid_bearer_token() {
    // Arrange
    let app = spawn_app().await;

    for token in [None, Some("foo".to_string())] {
        // Act
        let response = app
            .get_group_invitations(app.group.id.to_string(), token)
            .await;

        // Assert
        assert_eq!(401, response.status().as_u16());
    }
}

#[tokio::test]
async fn get_for_group_returns_403_when_caller_does_not_manage_the_group() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .get_group_invitations(app.other_group.id.to_string(), Some(app.manager_token()))
        .await;

    // Assert
    assert_eq!(403, response.status().as_u16());
}

#[tokio::test]
async fn get_for_group_returns_404_for_unknown_group() {
    // Arrange
    let app = spawn_app().await;
    let unknown_group_id = Uuid::new_v4();

    // Act
    let response = app
        .get_group_invitations(unknown_group_id.to_string(), Some(app.admin_token()))
        .await;

    // Assert
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn get_for_group_returns_an_empty_list_for_a_group_without_invitations() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .get_group_invitations(app.group.id.to_string(), Some(app.manager_token()))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());

    let invitations = response.json::<Vec<InvitationResponse>>().await.unwrap();
    assert!(invitations.is_empty());
}
