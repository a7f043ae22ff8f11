/// Integration tests for the vote toggle
///
/// Verifies, against a real database:
/// - The toggle scenario across two users
/// - Double toggle restores state and counter
/// - Unauthenticated votes write nothing
/// - Concurrent toggles keep the counter equal to the ledger

mod common;

use axum::http::StatusCode;
use common::TestContext;
use futures::future::join_all;
use serde_json::json;
use toolshub_shared::models::{tool::Tool, vote::Vote};

async fn counter(ctx: &TestContext) -> i32 {
    Tool::find_by_id(&ctx.db, ctx.tool.id)
        .await
        .unwrap()
        .unwrap()
        .upvotes
}

async fn ledger(ctx: &TestContext) -> i64 {
    Vote::count_for_tool(&ctx.db, ctx.tool.id).await.unwrap()
}

/// U1 votes, U2 votes, U1 un-votes: 1, 2, 1
#[tokio::test]
async fn test_toggle_scenario_two_users() {
    let Some(mut ctx) = TestContext::new().await else { return };
    let (_, other_token) = ctx.extra_user().await;
    let uri = format!("/api/tools/{}/vote", ctx.tool.id);

    let (status, body) = ctx.send("POST", &uri, Some(&ctx.user_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "hasVoted": true, "upvotes": 1 }));

    let (status, body) = ctx.send("POST", &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "hasVoted": true, "upvotes": 2 }));

    let (status, body) = ctx.send("POST", &uri, Some(&ctx.user_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "hasVoted": false, "upvotes": 1 }));

    assert_eq!(counter(&ctx).await, 1);
    assert_eq!(ledger(&ctx).await, 1);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_double_toggle_restores_state() {
    let Some(ctx) = TestContext::new().await else { return };
    let uri = format!("/api/tools/{}/vote", ctx.tool.id);

    let before = counter(&ctx).await;

    ctx.send("POST", &uri, Some(&ctx.user_token), None).await;
    assert!(Vote::exists(&ctx.db, ctx.user.id, ctx.tool.id).await.unwrap());

    let (status, body) = ctx.send("POST", &uri, Some(&ctx.user_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasVoted"], false);

    assert_eq!(counter(&ctx).await, before);
    assert!(!Vote::exists(&ctx.db, ctx.user.id, ctx.tool.id).await.unwrap());

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_unauthenticated_vote_writes_nothing() {
    let Some(ctx) = TestContext::new().await else { return };
    let uri = format!("/api/tools/{}/vote", ctx.tool.id);

    let (status, body) = ctx.send("POST", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = ctx.send("POST", &uri, Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(counter(&ctx).await, 0);
    assert_eq!(ledger(&ctx).await, 0);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_vote_unknown_tool_is_not_found() {
    let Some(ctx) = TestContext::new().await else { return };
    let uri = format!("/api/tools/{}/vote", uuid::Uuid::new_v4());

    let (status, body) = ctx.send("POST", &uri, Some(&ctx.user_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_detail_reports_vote_state() {
    let Some(ctx) = TestContext::new().await else { return };
    let detail = format!("/api/tools/{}", ctx.tool.id);
    let vote = format!("{}/vote", detail);

    let (status, body) = ctx.send("GET", &detail, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasVoted"], false);

    ctx.send("POST", &vote, Some(&ctx.user_token), None).await;

    let (_, body) = ctx.send("GET", &detail, Some(&ctx.user_token), None).await;
    assert_eq!(body["hasVoted"], true);
    assert_eq!(body["tool"]["upvotes"], 1);

    // Anonymous callers never see a vote
    let (_, body) = ctx.send("GET", &detail, None, None).await;
    assert_eq!(body["hasVoted"], false);

    ctx.cleanup().await;
}

/// Many users toggling at once: every toggle lands, counter matches ledger
#[tokio::test]
async fn test_concurrent_toggles_keep_counter_consistent() {
    let Some(mut ctx) = TestContext::new().await else { return };
    let uri = format!("/api/tools/{}/vote", ctx.tool.id);

    let mut tokens = Vec::new();
    for _ in 0..12 {
        let (_, token) = ctx.extra_user().await;
        tokens.push(token);
    }

    let results = join_all(
        tokens
            .iter()
            .map(|token| common::send(&ctx.app, "POST", &uri, Some(token), None)),
    )
    .await;

    assert!(results.iter().all(|(status, body)| {
        *status == StatusCode::OK && body["hasVoted"] == true
    }));
    assert_eq!(counter(&ctx).await, 12);
    assert_eq!(ledger(&ctx).await, 12);

    // Two toggles per user in flight at once; the pair always cancels out
    let results = join_all(tokens.iter().flat_map(|token| {
        [
            common::send(&ctx.app, "POST", &uri, Some(token), None),
            common::send(&ctx.app, "POST", &uri, Some(token), None),
        ]
    }))
    .await;

    assert!(results.iter().all(|(status, _)| *status == StatusCode::OK));
    assert_eq!(counter(&ctx).await, 12);
    assert_eq!(ledger(&ctx).await, 12);

    let drift = Vote::find_counter_drift(&ctx.db).await.unwrap();
    assert!(drift.iter().all(|(tool_id, _, _)| *tool_id != ctx.tool.id));

    ctx.cleanup().await;
}

/// The same user hammering one tool: the final state follows the parity
#[tokio::test]
async fn test_concurrent_toggles_same_user() {
    let Some(ctx) = TestContext::new().await else { return };

    let results = join_all(
        (0..7).map(|_| Vote::toggle(&ctx.db, ctx.user.id, ctx.tool.id)),
    )
    .await;

    let outcomes: Vec<_> = results
        .into_iter()
        .map(|r| r.unwrap().unwrap())
        .collect();
    assert_eq!(outcomes.iter().filter(|o| o.has_voted).count(), 4);

    assert_eq!(counter(&ctx).await, 1);
    assert_eq!(ledger(&ctx).await, 1);
    assert!(Vote::exists(&ctx.db, ctx.user.id, ctx.tool.id).await.unwrap());

    ctx.cleanup().await;
}
