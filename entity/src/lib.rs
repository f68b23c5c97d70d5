pub mod prelude;

pub mod competition;
pub mod drone;
pub mod drone_category;
pub mod pilot;
pub mod user;
