pub mod actions;
mod drivers;
mod error;
mod traits;

pub use drivers::auth_http::HttpAuthService;
pub use drivers::local::LocalBackend;
pub use drivers::presence::PresenceHub;
pub use error::{ActionError, AuthError};
pub use traits::{AuthService, BlogBackend, PresenceChannel};
