// Domain layer: the candidate store and the ports the host plugs into.

pub mod ports;
pub mod store;
