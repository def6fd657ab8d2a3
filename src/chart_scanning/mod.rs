/// Chart scanning core - domain model and pure domain services
///
/// Nothing in here touches processes, the network or the file system;
/// those live behind the ports.
pub mod domain;
pub mod services;
