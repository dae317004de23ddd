// API handlers, one module per resource.

pub mod guidelines;
pub mod moderate;
