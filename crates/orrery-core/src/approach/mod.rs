pub mod board;
pub mod countdown;
pub mod feed;
