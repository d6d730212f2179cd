pub mod pagination;
pub mod pagination_state;

pub use pagination::PaginationEngine;
pub use pagination_state::{PaginationReport, PaginationState, StopReason};
