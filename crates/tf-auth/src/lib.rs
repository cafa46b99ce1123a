pub mod claims;
pub mod error;
pub mod jwt_validator;
pub mod otp;
pub mod password;
pub mod token_issuer;
pub mod token_scope;

pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwt_validator::JwtValidator;
pub use token_issuer::TokenIssuer;
pub use token_scope::TokenScope;
