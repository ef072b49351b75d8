pub mod choreographer;
pub mod config;
pub mod master;
pub mod planner;
pub mod reveal;
pub mod scene;
pub mod scroll_lock;
