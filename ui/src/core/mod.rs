//! Platform plumbing shared by the translation layer.

pub mod platform;
pub mod storage;
pub mod timing;
