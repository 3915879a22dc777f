pub mod console;
pub mod console_state;
pub mod notification;
pub mod summary;

pub use console::Console;
pub use console_state::{ConsoleState, LoadedCollections, Transition};
pub use notification::{Level, Notification, Operation};
pub use summary::{CourseStatus, Summary, course_status, paid_revenue, summarize};
