pub mod types;
pub mod utils;
pub mod pagination;

pub use pagination::{Direction, Page, PageRequest, PaginationError};
