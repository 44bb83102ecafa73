pub mod controller;
pub mod edge;
pub mod error;
pub mod registry;
pub mod time;
