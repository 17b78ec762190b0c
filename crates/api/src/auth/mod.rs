//! Bearer-token verification.
//!
//! Tokens are issued by the external session provider and signed with the
//! shared `JWT_SECRET`; this server only verifies them.

pub mod jwt;
