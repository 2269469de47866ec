pub mod action;
pub mod debounce;
pub mod list;
pub mod toast;

pub use action::ActionGuard;
pub use debounce::SearchDebouncer;
pub use list::{ListView, LoadState, Searchable};
pub use toast::{MemoryNotifier, Notifier, Toast, TracingNotifier};
