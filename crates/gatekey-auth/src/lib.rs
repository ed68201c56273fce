//! # gatekey-auth
//!
//! Token issuance/verification and session lifecycle orchestration for
//! GateKey.
//!
//! ## Modules
//!
//! - `jwt` — the token codec: signed, time-bounded access and refresh
//!   tokens with a fixed, versioned claims record
//! - `session` — the lifecycle manager driving the signup, login,
//!   refresh, and logout flows over the user directory and session store

pub mod jwt;
pub mod session;

pub use jwt::{Claims, TokenDecoder, TokenEncoder, TokenPair};
pub use session::{AuthOutcome, SessionManager};
