//! `UserStore` backends.

pub mod file;
pub mod memory;
pub mod seaorm;

pub use file::FileUserStore;
pub use memory::MemoryUserStore;
pub use seaorm::SeaOrmUserStore;
