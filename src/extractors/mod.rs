pub mod json;
pub mod params;
pub use json::JsonBody;
pub use params::{PathParam, QueryParams};
