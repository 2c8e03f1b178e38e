pub mod prelude;

pub mod favourites;
pub mod homes;
pub mod users;
