//! App-level components that need routing or shared services.

mod nav_header;
mod notification_area;
mod session_guard;

pub use nav_header::{NavHeader, NavLocation};
pub use notification_area::NotificationArea;
pub use session_guard::SessionGuard;
