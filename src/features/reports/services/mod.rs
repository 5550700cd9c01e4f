mod geocoding_service;
mod report_service;

pub use geocoding_service::{GeocodingService, ResolvedLocation};
pub use report_service::ReportService;
