//! IO layer: the outer surfaces that drive the domain services.

pub mod rest;
