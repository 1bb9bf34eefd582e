//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 tokens backed by the sessions table
//! - `mock` - Test implementation that needs no signing secret

mod jwt;
mod mock;

pub use jwt::{issue_session_token, JwtSessionValidator, SessionClaims};
pub use mock::MockSessionValidator;
