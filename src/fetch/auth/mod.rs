//! Request decorators applied around an [`HttpClient`](super::HttpClient).

mod bearer;
mod query_param;

pub use bearer::Bearer;
pub use query_param::QueryParam;
