/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login, token refresh
/// - `tools`: Public listing, detail, submission and the vote toggle
/// - `contact`: Public contact form
/// - `admin`: Moderation, dashboard stats and the contact inbox

pub mod admin;
pub mod auth;
pub mod contact;
pub mod health;
pub mod tools;
