//! Progress reporting for persona turns

pub mod reporter;
