pub mod auth;
pub mod console;
pub mod form;
pub mod quiz;
pub mod screens;
pub mod sidebar;
