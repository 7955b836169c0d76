pub mod app;
pub mod host;
pub mod overlay;
pub mod page;
pub mod theme;
pub mod tree;
pub mod window;
