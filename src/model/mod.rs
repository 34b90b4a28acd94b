pub mod component;
pub mod config;
pub mod duration;
pub mod interval;
pub mod optimizer;
pub mod scores;
pub mod weights;
