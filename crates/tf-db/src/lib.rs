pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::account_repository::AccountRepository;
