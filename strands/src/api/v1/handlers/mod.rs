pub(crate) mod health;
pub mod strings;

pub use health::health_check;
