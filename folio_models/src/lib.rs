pub mod contact;
mod macros;
pub mod message;

pub use email_address;
