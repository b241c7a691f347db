pub mod julian;
pub mod time;
pub mod wall_clock;
