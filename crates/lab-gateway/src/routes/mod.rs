pub mod cache;
pub mod external;
pub mod health;
pub mod storage;
