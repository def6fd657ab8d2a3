/// Use cases module containing application business logic orchestration
mod dispatch_scans;
mod resolve_chart;
mod scan_chart;

pub use dispatch_scans::DispatchScansUseCase;
pub use resolve_chart::ResolveChartUseCase;
pub use scan_chart::ScanChartUseCase;
