//! Authentication subsystem: credential verification, login throttling,
//! the session store, and the CSRF guard.
//!
//! Every state-changing request passes the CSRF guard; every protected
//! request passes session validation. The two checks are independent and
//! both mandatory -- neither ever substitutes for the other.

pub mod credentials;
pub mod csrf;
pub mod password;
pub mod session;
pub mod throttle;
