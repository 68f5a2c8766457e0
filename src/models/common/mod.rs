pub mod cascade;
pub mod pagination;
pub mod response;

pub use cascade::{CascadeReport, EntityKind};
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery, normalize_page};
pub use response::ApiResponse;
