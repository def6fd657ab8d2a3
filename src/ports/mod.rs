/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) are the seams where the pipeline talks to
/// the render collaborator, the scan collaborator and the output destination.
pub mod outbound;
