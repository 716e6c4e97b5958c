//! Tower middleware for the API: request metrics, the access-log
//! recorder, and per-login rate limiting. Layer order is set in
//! [`crate::app`]; the access-log recorder sits outside auth and reads
//! the login the auth layer stamps on the response.

pub mod access_log;
pub mod metrics;
pub mod rate_limit;
