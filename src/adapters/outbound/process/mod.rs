/// Process adapters for the external helm and trivy collaborators
mod command;
mod helm_cli;
mod trivy_scanner;

pub use helm_cli::HelmCli;
pub use trivy_scanner::TrivyScanner;
