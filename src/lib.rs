pub mod api;
pub mod core;
pub mod notify;
pub mod runtime;
pub mod scanner;
