pub mod reports;
pub mod requests;
pub mod users;
pub mod zonals;
