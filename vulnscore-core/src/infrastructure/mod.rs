//! Adapters over third-party libraries

pub mod cvss;
