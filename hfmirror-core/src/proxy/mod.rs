mod error;
mod error_classification;
mod forward;
mod gateway;
mod handlers;

#[cfg(test)]
mod tests;

pub use error::ProxyError;
pub use error_classification::{TransportFailure, classify_pingora_error};
pub use forward::ForwardEngine;
pub use gateway::MirrorGateway;
