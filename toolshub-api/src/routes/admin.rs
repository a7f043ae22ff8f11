/// Administration endpoints (ADMIN role required)
///
/// Every route here sits behind the authentication layer and the admin
/// capability guard; handlers can assume an administrator caller.
///
/// - `GET  /api/admin/tools?status=all|pending|approved` - Moderation list
/// - `POST /api/admin/tools/:id/approve` - Approve a tool
/// - `GET  /api/admin/stats` - Dashboard counters
/// - `GET  /api/admin/messages?unread=true` - Contact inbox
/// - `POST /api/admin/messages/:id/read` - Mark a message read

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiPath, ApiQuery},
};
use axum::{
    extract::State,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use toolshub_shared::{
    auth::middleware::AuthContext,
    models::{
        contact_message::ContactMessage,
        stats::DashboardStats,
        tool::{ModerationFilter, ModerationTool, Tool},
    },
};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct ModerationQuery {
    #[serde(default)]
    pub status: ModerationFilter,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModerationListResponse {
    pub tools: Vec<ModerationTool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApproveResponse {
    pub message: String,
    pub tool: Tool,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    /// Only unread messages when true
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<ContactMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub message: String,
    pub contact: ContactMessage,
}

/// Moderation list, newest first, with submitter details and ledger counts
pub async fn list_tools(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ModerationQuery>,
) -> ApiResult<Json<ModerationListResponse>> {
    let tools = Tool::list_for_moderation(&state.db, query.status).await?;

    Ok(Json(ModerationListResponse { tools }))
}

/// Approve a tool
///
/// Idempotent: approving an already approved tool reports success and leaves
/// it unchanged.
///
/// # Endpoint
///
/// ```text
/// POST /api/admin/tools/:id/approve
/// Authorization: Bearer <admin token>
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Tool approved successfully", "tool": { "isApproved": true, ... } }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Caller is not an administrator (tool unchanged)
/// - `404 Not Found`: Unknown tool
pub async fn approve_tool(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ApproveResponse>> {
    let tool = Tool::approve(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tool not found".to_string()))?;

    info!(tool_id = %tool.id, admin_id = %auth.user_id, "Approval recorded");

    Ok(Json(ApproveResponse {
        message: "Tool approved successfully".to_string(),
        tool,
    }))
}

/// Dashboard counters
///
/// # Response
///
/// ```json
/// {
///   "totalUsers": 12,
///   "totalTools": 30,
///   "pendingTools": 4,
///   "totalMessages": 7,
///   "unreadMessages": 2,
///   "totalUpvotes": 118
/// }
/// ```
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(DashboardStats::collect(&state.db).await?))
}

/// Contact inbox, newest first
pub async fn list_messages(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MessagesQuery>,
) -> ApiResult<Json<MessageListResponse>> {
    let messages = ContactMessage::list(&state.db, query.unread).await?;

    Ok(Json(MessageListResponse { messages }))
}

/// Mark a contact message read (idempotent)
pub async fn mark_message_read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MarkReadResponse>> {
    let contact = ContactMessage::mark_read(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Message not found".to_string()))?;

    Ok(Json(MarkReadResponse {
        message: "Message marked as read".to_string(),
        contact,
    }))
}
