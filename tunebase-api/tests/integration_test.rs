/// Integration tests for the TuneBase API
///
/// Drives the full router through `tower::Service` against a real
/// PostgreSQL instance, covering the behavioral guarantees the unit
/// tests cannot reach: tenant isolation, the admin role policy, the
/// signup bootstrap, full-replace updates, and the favorites flow.

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use tunebase_shared::models::organization::Organization;
use tunebase_shared::models::user::{Role, User};
use uuid::Uuid;

#[tokio::test]
async fn test_cross_tenant_lookups_return_not_found() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let artist_id = common::seed_artist(&ctx.db, ctx.org_id, "Miles Davis").await;
    let album_id = common::seed_album(&ctx.db, artist_id, "Kind of Blue", 1959).await;
    let track_id = common::seed_track(&ctx.db, artist_id, album_id, "So What").await;

    // The owner sees the record
    let (status, body) = common::send(
        &ctx.app,
        "GET",
        &format!("/artists/{}", artist_id),
        Some(&ctx.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Miles Davis");

    // A caller from another organization gets 404, indistinguishable
    // from the record not existing at all
    let foreign = ctx.foreign_actor().await.unwrap();
    for uri in [
        format!("/artists/{}", artist_id),
        format!("/albums/{}", album_id),
        format!("/tracks/{}", track_id),
    ] {
        let (status, body) = common::send(&ctx.app, "GET", &uri, Some(&foreign), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "leaked {}", uri);
        assert!(body["data"].is_null());
    }

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_track_create_rejects_album_of_another_artist() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let artist_a = common::seed_artist(&ctx.db, ctx.org_id, "Artist A").await;
    let album_a = common::seed_album(&ctx.db, artist_a, "First Album", 2001).await;
    let artist_b = common::seed_artist(&ctx.db, ctx.org_id, "Artist B").await;

    // Valid artist, but the album belongs to someone else
    let (status, body) = common::send(
        &ctx.app,
        "POST",
        "/tracks/add-track",
        Some(&ctx.token),
        Some(json!({
            "artist_id": artist_b,
            "album_id": album_a,
            "name": "Stray",
            "duration": 200,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Album not found.");

    // The correct pairing succeeds
    let (status, body) = common::send(
        &ctx.app,
        "POST",
        "/tracks/add-track",
        Some(&ctx.token),
        Some(json!({
            "artist_id": artist_a,
            "album_id": album_a,
            "name": "Opener",
            "duration": 180,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Track created successfully.");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_admin_role_policy() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    // add-user can never mint an admin, whoever asks
    let (status, body) = common::send(
        &ctx.app,
        "POST",
        "/users/add-user",
        Some(&ctx.token),
        Some(json!({
            "email": format!("wannabe-{}@example.com", Uuid::new_v4()),
            "password": "long-enough-password",
            "role": "admin",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Cannot create admin users");

    // A regular role is accepted
    let (status, _) = common::send(
        &ctx.app,
        "POST",
        "/users/add-user",
        Some(&ctx.token),
        Some(json!({
            "email": format!("newbie-{}@example.com", Uuid::new_v4()),
            "password": "long-enough-password",
            "role": "viewer",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The admin user cannot be deleted by anyone
    let (admin_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (email, password_hash, role, org_id) VALUES ($1, 'x', 'admin', $2) RETURNING user_id",
    )
    .bind(format!("admin-{}@example.com", Uuid::new_v4()))
    .bind(ctx.org_id)
    .fetch_one(&ctx.db)
    .await
    .unwrap();

    let (status, body) = common::send(
        &ctx.app,
        "DELETE",
        &format!("/users/{}", admin_id),
        Some(&ctx.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Cannot delete admin user.");

    // A non-admin target in the same organization can be deleted
    let (victim_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (email, password_hash, role, org_id) VALUES ($1, 'x', 'viewer', $2) RETURNING user_id",
    )
    .bind(format!("victim-{}@example.com", Uuid::new_v4()))
    .bind(ctx.org_id)
    .fetch_one(&ctx.db)
    .await
    .unwrap();

    let (status, body) = common::send(
        &ctx.app,
        "DELETE",
        &format!("/users/{}", victim_id),
        Some(&ctx.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully.");

    ctx.cleanup().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_first_signup_becomes_the_only_admin() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    // Start from an empty user table so the bootstrap applies
    sqlx::query("DELETE FROM users")
        .execute(&ctx.db)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..5 {
        let app = ctx.app.clone();
        handles.push(tokio::spawn(async move {
            let (status, _) = common::send(
                &app,
                "POST",
                "/signup",
                None,
                Some(json!({
                    "email": format!("racer-{}@example.com", i),
                    "password": "long-enough-password",
                    "organization": format!("Racer Org {}", i),
                })),
            )
            .await;
            status
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let (admins,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'admin'")
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(admins, 1);

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(total, 5);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_signup_login_flow() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    // Signup without an organization name falls back to the default
    let email = format!("first-{}@example.com", Uuid::new_v4());
    let (status, body) = common::send(
        &ctx.app,
        "POST",
        "/signup",
        None,
        Some(json!({"email": email, "password": "long-enough-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully.");

    let user = User::find_by_email(&ctx.db, &email).await.unwrap().unwrap();
    let org = Organization::find_by_id(&ctx.db, user.org_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(org.name, "Default Test Organization");

    // Duplicate email conflicts
    let (status, body) = common::send(
        &ctx.app,
        "POST",
        "/signup",
        None,
        Some(json!({"email": email, "password": "long-enough-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists.");

    // Unknown email
    let (status, body) = common::send(
        &ctx.app,
        "POST",
        "/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "long-enough-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found.");

    // Known email with the wrong password is 400, not 401
    let (status, body) = common::send(
        &ctx.app,
        "POST",
        "/login",
        None,
        Some(json!({"email": ctx.user.email, "password": "not-the-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid credentials.");

    // Correct credentials return a token that works on protected routes
    let (status, body) = common::send(
        &ctx.app,
        "POST",
        "/login",
        None,
        Some(json!({"email": ctx.user.email, "password": common::TEST_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful.");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, _) = common::send(&ctx.app, "GET", "/artists", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_album_update_is_full_replace() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let artist_id = common::seed_artist(&ctx.db, ctx.org_id, "Björk").await;
    let album_id = common::seed_album(&ctx.db, artist_id, "Debut", 1993).await;

    let (status, body) = common::send(
        &ctx.app,
        "PUT",
        &format!("/albums/{}", album_id),
        Some(&ctx.token),
        Some(json!({"name": "Post", "year": 1995, "hidden": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    // Every writable field reflects the request body
    let (status, body) = common::send(
        &ctx.app,
        "GET",
        &format!("/albums/{}", album_id),
        Some(&ctx.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Post");
    assert_eq!(body["data"]["year"], 1995);
    assert_eq!(body["data"]["hidden"], true);
    assert_eq!(body["data"]["artist_name"], "Björk");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_favorite_round_trip() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let artist_id = common::seed_artist(&ctx.db, ctx.org_id, "Nina Simone").await;

    let (status, body) = common::send(
        &ctx.app,
        "POST",
        "/favorites/add-favorite",
        Some(&ctx.token),
        Some(json!({"category": "artist", "item_id": artist_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Favorite added successfully.");

    let (status, body) = common::send(
        &ctx.app,
        "GET",
        "/favorites/artist",
        Some(&ctx.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let favorites = body["data"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["item_id"], json!(artist_id));
    assert_eq!(favorites[0]["name"], "Nina Simone");
    let favorite_id = favorites[0]["favorite_id"].as_str().unwrap().to_string();

    // An unknown category is rejected before touching storage
    let (status, body) =
        common::send(&ctx.app, "GET", "/favorites/playlist", Some(&ctx.token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid category.");

    // An item from another organization cannot be favorited
    let foreign = ctx.foreign_actor().await.unwrap();
    let (status, body) = common::send(
        &ctx.app,
        "POST",
        "/favorites/add-favorite",
        Some(&foreign),
        Some(json!({"category": "artist", "item_id": artist_id})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found.");

    let (status, body) = common::send(
        &ctx.app,
        "DELETE",
        &format!("/favorites/remove-favorite/{}", favorite_id),
        Some(&ctx.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Favorite removed successfully.");

    // Removing it again reports it gone
    let (status, body) = common::send(
        &ctx.app,
        "DELETE",
        &format!("/favorites/remove-favorite/{}", favorite_id),
        Some(&ctx.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Favorite not found.");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_protected_routes_require_valid_token() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    // Missing and malformed credentials produce the same response
    let (status, body) = common::send(&ctx.app, "GET", "/artists", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized Access");

    let (status, body) =
        common::send(&ctx.app, "GET", "/artists", Some("not-a-real-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized Access");

    // A token signed with another secret is rejected the same way
    let claims = tunebase_shared::auth::jwt::Claims::new(ctx.user.user_id, ctx.org_id, Role::Editor);
    let forged =
        tunebase_shared::auth::jwt::create_token(&claims, "some-other-secret-32-bytes-long!!")
            .unwrap();
    let (status, body) = common::send(&ctx.app, "GET", "/artists", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized Access");

    ctx.cleanup().await;
}
