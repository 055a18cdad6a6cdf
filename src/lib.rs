pub mod ast;
pub mod config;
pub mod db;
pub mod editor;
pub mod session;
pub mod ui;
