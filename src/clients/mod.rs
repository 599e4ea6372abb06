pub mod api;
pub mod circuit_breaker;
pub mod health;
