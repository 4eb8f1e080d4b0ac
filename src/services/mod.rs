pub mod circuit_breaker;
pub mod concierge;
pub mod gemini;
pub mod sessions;
