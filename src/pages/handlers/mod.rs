pub mod login;
pub mod views;
