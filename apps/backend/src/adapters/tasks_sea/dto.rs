//! DTOs for tasks_sea adapter.

use sea_orm::Order;

/// DTO for inserting a task; `position` is already resolved.
#[derive(Debug, Clone)]
pub struct TaskCreate {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskOrderField {
    #[default]
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<SortDirection> for Order {
    fn from(dir: SortDirection) -> Self {
        match dir {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Filter, ordering and window for listing a user's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskListQuery {
    pub completed: Option<bool>,
    pub order_by: TaskOrderField,
    pub direction: SortDirection,
    pub limit: u64,
    pub offset: u64,
}

impl Default for TaskListQuery {
    fn default() -> Self {
        Self {
            completed: None,
            order_by: TaskOrderField::default(),
            direction: SortDirection::default(),
            limit: 100,
            offset: 0,
        }
    }
}
