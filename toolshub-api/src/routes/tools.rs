/// Tool directory endpoints
///
/// - `GET  /api/tools` - List approved tools (search + category filter)
/// - `POST /api/tools` - Submit a tool for review (authenticated)
/// - `GET  /api/tools/:id` - Tool detail with the caller's vote state
/// - `POST /api/tools/:id/vote` - Toggle the caller's vote (authenticated)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath, ApiQuery},
};
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use toolshub_shared::{
    auth::{authorization::can_view_tool, middleware::AuthContext},
    models::{
        tool::{normalize_category, CreateTool, Pricing, Tool, ToolFilter},
        vote::{Vote, VoteOutcome},
    },
};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Query parameters for the public listing
#[derive(Debug, Default, Deserialize)]
pub struct ListToolsQuery {
    /// Substring of title or description
    pub query: Option<String>,

    /// Category name (`IMAGE_GENERATION` or `image generation`)
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolListResponse {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDetailResponse {
    pub tool: Tool,

    /// False for anonymous callers
    pub has_voted: bool,
}

/// Tool submission
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmitToolRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    pub description: String,

    #[validate(
        url(message = "Invalid URL"),
        length(max = 2048, message = "URL must be at most 2048 characters")
    )]
    pub url: String,

    #[validate(
        url(message = "Invalid image URL"),
        length(max = 2048, message = "Image URL must be at most 2048 characters")
    )]
    pub image_url: Option<String>,

    pub pricing: Pricing,

    #[validate(
        length(max = 5, message = "At most 5 categories"),
        custom(function = "validate_category_names")
    )]
    pub categories: Vec<String>,
}

const MAX_CATEGORY_LEN: usize = 64;

/// Category names are stored normalized; each must fit the column
#[allow(clippy::ptr_arg)]
fn validate_category_names(categories: &Vec<String>) -> Result<(), ValidationError> {
    if categories
        .iter()
        .any(|name| normalize_category(name).chars().count() > MAX_CATEGORY_LEN)
    {
        let mut err = ValidationError::new("category_length");
        err.message = Some("Category names must be at most 64 characters".into());
        return Err(err);
    }

    Ok(())
}

impl SubmitToolRequest {
    /// Trims text fields; a blank image URL counts as absent
    fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            url: self.url.trim().to_string(),
            image_url: self
                .image_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
            pricing: self.pricing,
            categories: self
                .categories
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitToolResponse {
    pub message: String,
    pub tool: Tool,
}

/// List approved tools, most upvoted first
///
/// # Endpoint
///
/// ```text
/// GET /api/tools?query=image&category=IMAGE_GENERATION
/// ```
///
/// # Response
///
/// ```json
/// { "tools": [{ "id": "uuid", "title": "...", "upvotes": 3, "isApproved": true, ... }] }
/// ```
pub async fn list_tools(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListToolsQuery>,
) -> ApiResult<Json<ToolListResponse>> {
    let filter = ToolFilter {
        query: params.query,
        category: params.category,
    };

    let tools = Tool::list_approved(&state.db, &filter).await?;

    Ok(Json(ToolListResponse { tools }))
}

/// Submit a tool for review
///
/// The tool starts `Pending` and is hidden from the public listing until an
/// administrator approves it.
///
/// # Endpoint
///
/// ```text
/// POST /api/tools
/// Authorization: Bearer <token>
///
/// {
///   "title": "Sketchpad",
///   "description": "Turns prompts into drawings",
///   "url": "https://sketchpad.example",
///   "imageUrl": "https://sketchpad.example/logo.png",
///   "pricing": "FREEMIUM",
///   "categories": ["IMAGE_GENERATION"]
/// }
/// ```
///
/// # Response (201)
///
/// ```json
/// { "message": "Tool submitted for review", "tool": { ... } }
/// ```
pub async fn submit_tool(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<SubmitToolRequest>,
) -> ApiResult<(StatusCode, Json<SubmitToolResponse>)> {
    let req = req.normalized();
    req.validate()?;

    let tool = Tool::create(
        &state.db,
        CreateTool {
            title: req.title,
            description: req.description,
            url: req.url,
            image_url: req.image_url,
            pricing: req.pricing,
            categories: req.categories,
            submitted_by: Some(auth.user_id),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitToolResponse {
            message: "Tool submitted for review".to_string(),
            tool,
        }),
    ))
}

/// Tool detail
///
/// Pending tools are only visible to administrators and their submitter;
/// everyone else gets 404.
///
/// # Endpoint
///
/// ```text
/// GET /api/tools/:id
/// Authorization: Bearer <token>   (optional)
/// ```
///
/// # Response
///
/// ```json
/// { "tool": { ... }, "hasVoted": true }
/// ```
pub async fn get_tool(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ToolDetailResponse>> {
    let auth = auth.map(|Extension(auth)| auth);

    let tool = Tool::find_by_id(&state.db, id)
        .await?
        .filter(|tool| can_view_tool(auth.as_ref(), tool))
        .ok_or_else(|| ApiError::NotFound("Tool not found".to_string()))?;

    let has_voted = match auth {
        Some(auth) => Vote::exists(&state.db, auth.user_id, tool.id).await?,
        None => false,
    };

    Ok(Json(ToolDetailResponse { tool, has_voted }))
}

/// Toggle the caller's vote
///
/// Adds the vote when absent and removes it when present; the tool's
/// `upvotes` moves by exactly one in the same transaction.
///
/// # Endpoint
///
/// ```text
/// POST /api/tools/:id/vote
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// { "hasVoted": true, "upvotes": 4 }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: No valid token (nothing is written)
/// - `404 Not Found`: Unknown tool
pub async fn toggle_vote(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<VoteOutcome>> {
    let outcome = Vote::toggle(&state.db, auth.user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tool not found".to_string()))?;

    Ok(Json(outcome))
}
