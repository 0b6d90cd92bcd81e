// Infrastructure layer modules
pub mod forward_config;
pub mod logging;
pub mod sns_ops;

// Re-exports
pub use forward_config::{ForwardConfig, ForwardConfigError};
pub use logging::init_logging;
pub use sns_ops::{AwsSnsOps, SnsOps, SnsOpsError};
