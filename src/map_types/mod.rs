pub mod roles;
pub mod rooms;
