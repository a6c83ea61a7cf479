mod handlers;
pub mod router;
mod session;
