pub mod tasks;
pub mod users;

pub use tasks::Entity as Tasks;
pub use tasks::Model as Task;
pub use users::Entity as Users;
pub use users::Model as User;
