pub mod extract;
pub mod password;
pub mod tokens;

// Re-export the request gates so handlers can do "use crate::auth::AdminUser;"
pub use extract::{AdminUser, AuthUser};
