mod flow_tests;
mod utils;
