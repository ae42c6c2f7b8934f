pub mod buckets;
pub mod buffer;
pub mod sample;
pub mod viewport;
