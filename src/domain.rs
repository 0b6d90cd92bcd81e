// Domain layer modules
pub mod forward_record;
pub mod publish_response;
pub mod topic_arn;

// Re-exports
pub use forward_record::ForwardRecord;
pub use publish_response::{PublishResponse, PublishResponseError, PublishStatus};
pub use topic_arn::TopicArn;
