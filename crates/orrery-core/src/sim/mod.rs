pub mod clock;
pub mod live;
pub mod scrubber;
