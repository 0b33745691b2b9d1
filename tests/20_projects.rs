mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use common::TestServer;

#[tokio::test]
async fn project_crud() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("carol@example.com").await?;

    let project_id = server.create_project(&token, "Journal").await?;

    let res = server
        .api(Method::GET, &format!("/projects/get-project-by-ID/{}", project_id), Some(&token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["title"], "Journal");
    assert_eq!(body["data"]["priority"], "high");
    assert!(body["data"]["dateCreated"].is_string());

    let res = server
        .api(Method::PUT, &format!("/projects/update-project-by-ID/{}", project_id), Some(&token))
        .json(&json!({ "title": "Renamed", "description": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = server
        .api(Method::GET, &format!("/projects/get-project-by-ID/{}", project_id), Some(&token))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["data"]["title"], "Renamed");
    assert_eq!(body["data"]["description"], "A project");

    let res = server
        .api(Method::DELETE, &format!("/projects/delete-project-by-ID/{}", project_id), Some(&token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .api(Method::GET, &format!("/projects/get-project-by-ID/{}", project_id), Some(&token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn create_requires_all_fields() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("dave@example.com").await?;

    let res = server
        .api(Method::POST, "/projects/create-new-project", Some(&token))
        .json(&json!({ "title": "Only a title" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    Ok(())
}

#[tokio::test]
async fn update_without_fields_is_a_client_error() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("erin@example.com").await?;
    let project_id = server.create_project(&token, "Journal").await?;

    let res = server
        .api(Method::PUT, &format!("/projects/update-project-by-ID/{}", project_id), Some(&token))
        .json(&json!({ "title": "", "deadline": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "no fields to update");

    Ok(())
}

#[tokio::test]
async fn bad_ids_and_unknown_projects() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("frank@example.com").await?;

    let res = server
        .api(Method::GET, "/projects/get-project-by-ID/not-a-uuid", Some(&token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .api(Method::GET, &format!("/projects/get-project-by-ID/{}", Uuid::new_v4()), Some(&token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .api(Method::DELETE, "/projects/delete-project-by-ID/not-a-uuid", Some(&token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn projects_are_private_to_their_owner() -> Result<()> {
    let server = TestServer::spawn().await?;
    let owner = server.signup("grace@example.com").await?;
    let other = server.signup("heidi@example.com").await?;
    let project_id = server.create_project(&owner, "Private").await?;

    let res = server
        .api(Method::GET, &format!("/projects/get-project-by-ID/{}", project_id), Some(&other))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = server
        .api(Method::GET, "/projects/get-projects-by-user-ID", Some(&other))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["data"], json!([]));

    // Writes from another user leave the project untouched
    server
        .api(Method::PUT, &format!("/projects/update-project-by-ID/{}", project_id), Some(&other))
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await?;
    server
        .api(Method::DELETE, &format!("/projects/delete-project-by-ID/{}", project_id), Some(&other))
        .send()
        .await?;

    let body = server
        .api(Method::GET, &format!("/projects/get-project-by-ID/{}", project_id), Some(&owner))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["data"]["title"], "Private");

    Ok(())
}

#[tokio::test]
async fn deleting_a_project_removes_its_tasks() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("ivan@example.com").await?;
    let project_id = server.create_project(&token, "Doomed").await?;

    let res = server
        .api(Method::POST, "/tasks/create-new-task", Some(&token))
        .json(&json!({ "linkedProjectID": project_id, "description": "first" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let task_id = res.json::<Value>().await?["data"]["taskID"]
        .as_str()
        .unwrap()
        .to_string();

    let res = server
        .api(Method::DELETE, &format!("/projects/delete-project-by-ID/{}", project_id), Some(&token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .api(Method::GET, &format!("/tasks/get-task-by-ID/{}", task_id), Some(&token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = server
        .api(
            Method::GET,
            &format!("/tasks/get-tasks-by-linked-project-ID/{}", project_id),
            Some(&token),
        )
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["data"], json!([]));

    Ok(())
}
