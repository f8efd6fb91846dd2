//! DTOs for the gateway endpoints

pub mod compress;
