pub mod in_memory;
pub mod quotes;
pub mod razorpay;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
