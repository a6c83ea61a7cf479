pub mod auth_http;
pub mod local;
pub mod presence;
