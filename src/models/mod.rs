pub mod circuit_breaker;
pub mod element;
pub mod health;
pub mod permission;
pub mod placeholder;
pub mod preview;
pub mod response;
pub mod retry;
pub mod template;
