pub mod input;
pub mod service;

pub use input::{TaskInput, TaskView, parse_id};
pub use service::{
    TASK_LIST_LIMIT, add_task, delete_task, get_task, list_tasks, mark_done, search_filter,
    update_task,
};
