pub mod pacer;
pub mod sequence;
pub mod spiral;
pub mod trigger;
