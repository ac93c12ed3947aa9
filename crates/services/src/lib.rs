pub mod blocklist;
pub mod comments;
pub mod content;
pub mod dao;
pub mod engine;
pub mod error;
pub mod notify;
pub mod posts;
pub mod reports;

pub use blocklist::BlockService;
pub use comments::CommentService;
pub use dao::{PaginatedResult, PaginationParams, ReadFilter};
pub use engine::Engine;
pub use error::{CoreError, CoreResult};
pub use notify::NotifyService;
pub use posts::PostService;
pub use reports::{ModerationRoster, NotifyFiler, ReportService};
