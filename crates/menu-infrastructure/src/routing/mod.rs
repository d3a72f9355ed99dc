//! Named-route resolution

pub mod route_table;

pub use route_table::{RouteTable, RouteTableError};
