pub mod external_products;
pub mod matching;
pub mod providers;
pub mod recommendations;
pub mod storage;

pub use storage::{MemStorage, Storage};
