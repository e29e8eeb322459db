pub mod board;
pub mod dragdrop;
pub mod editor;
pub mod hierarchy;
pub mod model;
pub mod remote;
pub mod session;
pub mod tui;
