pub mod authenticator;
pub mod bearer;
pub mod claims;
pub mod jwt;
pub mod password;
pub mod path_identity;

pub use authenticator::{AuthError, Authenticate, Authenticator, Identity};
pub use claims::Claims;
pub use path_identity::PathIdentityExtractor;
