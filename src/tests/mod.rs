pub mod utils;

mod client_tests;
