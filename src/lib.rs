pub mod error;
pub mod net;
pub mod profile;
pub mod scenario;
pub mod sim;
pub mod topo;
pub mod workload;

#[cfg(test)]
mod test;
