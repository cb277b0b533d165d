//! In-memory console todo list.

pub mod display;
pub mod menu;
pub mod store;
pub mod validation;

pub use menu::run;
pub use store::{AddError, Task, TaskStore};
pub use validation::ValidationErrorKind;
