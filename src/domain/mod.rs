// Domain layer: result model, response mapping, query parameters and ports.

pub mod collection;
pub mod mapping;
pub mod model;
pub mod ports;
pub mod query;
