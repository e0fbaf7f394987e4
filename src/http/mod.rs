//! HTTP boundary for the gateway.

pub mod middleware;
pub mod response;
pub mod server;

pub use server::GatewayServer;
