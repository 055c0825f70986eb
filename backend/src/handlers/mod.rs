//! HTTP request handlers for the Farm Management Platform

pub mod crop_price;
pub mod dashboard;
pub mod health;
pub mod inputs;
pub mod machinery;
pub mod plot;
pub mod production;

pub use crop_price::*;
pub use dashboard::*;
pub use health::*;
pub use inputs::*;
pub use machinery::*;
pub use plot::*;
pub use production::*;
