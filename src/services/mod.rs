pub mod auth;
pub mod listing;
pub mod uploads;

pub use auth::{AuthService, LoginOutcome};
pub use listing::ListingService;
pub use uploads::{CleanupOutcome, UploadError, UploadService};
