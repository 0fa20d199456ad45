pub mod middleware_test;
pub mod products_test;
pub mod root_test;
