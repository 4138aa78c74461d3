//! Upstream integrations for the Guard node.

pub mod factory;
pub mod guard;
pub mod services;

pub use guard::HttpGuardClient;
pub use services::PluginServicesFactory;
