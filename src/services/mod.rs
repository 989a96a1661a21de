pub mod profile;
pub mod route_table;
pub mod session;
pub mod verifier;
