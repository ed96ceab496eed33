use foyer_shared::invitations::InvitationResponse;

use crate::helpers::spawn_app;

#[tokio::test]
async fn list_returns_all_invitations_for_admins() {
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
    let response = app.get_invitation_list(Some(app.admin_token())).await;

    // Assert
    assert_eq!(200, response.status().as_u16());

    let invitations = response.json::<Vec<InvitationResponse>>().await.unwrap();
    assert_eq!(2, invitations.len());
}

#[tokio::test]
async fn list_returns_only_managed_groups_for_managers() {
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
    let response = app.get_invitation_list(Some(app.manager_token())).await;

    // Assert
    let invitations = response.json::<Vec<InvitationResponse>>().await.unwrap();
    assert_eq!(1, invitations.len());
    assert_eq!(app.group.id, invitations[0].group_id);
}

#[tokio::test]
async fn list_returns_an_empty_list_for_users_without_managed_groups() {
    // Arrange
    let app = spawn_app().await;
    app.create_invitation(serde_json::json!({ "group_id": app.group.id }))
        .await;

    // Act
    let response = app.get_invitation_list(Some(app.user_token())).await;

    // Assert
    assert_eq!(200, response.status().as_u16());

    let invitations = response.json::<Vec<InvitationResponse>>().await.unwrap();
    assert!(invitations.is_empty());
}

#[tokio::test]
async fn list_returns_401_for_missing_or_invalid_bearer_token() {
    // Arrange
    let app = spawn_app().await;

    for token in [None, Some("foo".to_string())] {
        // Act
        let response = app.get_invitation_list(token).await;

        // Assert
        assert_eq!(401, response.status().as_u16());
    }
}
