// # Address Cache Implementations
//
// This module provides implementations of the AddressCache trait for
// different persistence strategies.

pub mod file;
pub mod memory;

pub use file::FileAddressCache;
pub use memory::MemoryAddressCache;
