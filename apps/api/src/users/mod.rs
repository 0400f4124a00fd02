// Per-user model API key storage.
// The key is read before every live generation and never logged.

pub mod handlers;
pub mod repository;
