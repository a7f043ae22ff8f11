/// Middleware modules for the API server
///
/// - `auth`: bearer authentication and the admin capability guard

pub mod auth;
