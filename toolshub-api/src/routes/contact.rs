/// Public contact form
///
/// # Endpoint
///
/// ```text
/// POST /api/contact
/// Content-Type: application/json
///
/// {
///   "name": "Jane Doe",
///   "email": "jane@example.com",
///   "subject": "Listing question",
///   "message": "How long does review take?"
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Message sent successfully", "id": "uuid" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: A field is blank or the email is malformed; nothing is
///   stored

use crate::{app::AppState, error::ApiResult, extract::ApiJson};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use toolshub_shared::models::contact_message::{ContactMessage, CreateContactMessage};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 255, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

impl ContactRequest {
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
    pub id: Uuid,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ContactRequest>,
) -> ApiResult<Json<ContactResponse>> {
    let req = req.trimmed();
    req.validate()?;

    let contact = ContactMessage::create(
        &state.db,
        CreateContactMessage {
            name: req.name,
            email: req.email,
            subject: req.subject,
            message: req.message,
        },
    )
    .await?;

    info!(contact_id = %contact.id, "Contact message received");

    Ok(Json(ContactResponse {
        message: "Message sent successfully".to_string(),
        id: contact.id,
    }))
}
