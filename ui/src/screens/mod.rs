pub mod pool;
pub mod pools;
