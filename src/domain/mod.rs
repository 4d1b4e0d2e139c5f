// Domain layer: parcel and pricing models plus the ports the server depends on.

pub mod model;
pub mod ports;
