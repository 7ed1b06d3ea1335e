//! Adjustment engine: match records to spots, apply modes, route documents.

pub mod apply;
pub mod matcher;
pub mod route;

pub use matcher::match_document;
pub use route::route_document;
