pub mod http;
pub mod traits;

// Broker API implementations
pub mod upstox;
