pub mod favourite;
pub mod home;
pub mod user;
