pub mod pagination;
pub mod response;

pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
