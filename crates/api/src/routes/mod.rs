//! Route Handlers

pub mod diabetes;
pub mod insurance;
