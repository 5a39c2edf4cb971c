pub mod types;
pub mod error;
pub mod config;
pub mod transform;
pub mod aoi;
pub mod action;
pub mod robot;
pub mod camera;
pub mod decode;
pub mod pipeline;
