mod auth_tests;
mod test_utils;
