pub mod chunks;
pub mod drops;
pub mod trees;
