//! End-to-end tests driving commands and tables through the public API.

pub mod call_test;
pub mod dispatch_test;
pub mod partial_test;
pub mod settings_test;
