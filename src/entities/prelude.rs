pub use super::favourites::Entity as Favourites;
pub use super::homes::Entity as Homes;
pub use super::users::Entity as Users;
