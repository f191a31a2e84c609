//! Domain layer for the auth resolver.

pub mod gate;
pub mod resolver;

pub use gate::AuthorizationGate;
pub use resolver::PrincipalResolver;
