mod dashboard_tab;
mod location;
mod note;
mod report;

pub use dashboard_tab::{DashboardTab, TabCounts};
pub use location::{Coordinates, Location};
pub use note::{compose_note, parse_note, ParsedNote};
pub use report::{
    MediaAttachment, MediaKind, NewReport, NoteVisibility, Report, ReportPriority, ReportStatus,
    WorkflowUpdate,
};
