pub mod schema;
pub mod send;
pub mod serve;
