pub mod clipboard;
pub mod context;
pub mod controller;
pub mod display;
pub mod features;
pub mod menu;
pub mod network;
pub mod state;
