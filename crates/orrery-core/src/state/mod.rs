pub mod command;
pub mod selection;
pub mod store;
pub mod visibility;
