mod router;

#[cfg(test)]
mod tests;

pub use router::{RouteDecision, Router};
