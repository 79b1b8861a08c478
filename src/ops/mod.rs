pub mod filter;
pub mod reorder;
pub mod task_ops;
