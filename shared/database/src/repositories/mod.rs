pub mod order_item;
pub mod submission;

pub use order_item::OrderItemRepository;
pub use submission::{SubmissionFilter, SubmissionRepository};
