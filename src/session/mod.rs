pub mod cookie;
mod extractors;
mod guard;

pub use extractors::CurrentUser;
pub use guard::require_session;

/// Session token taken from the request cookie.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);
