/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const TASK_ROUTE_COMPONENT: &str = "task";
pub const TASK_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", TASK_ROUTE_COMPONENT);

pub const TASKS_ROUTE_COMPONENT: &str = "tasks";
pub const NEXTDATE_ROUTE_COMPONENT: &str = "nextdate";
pub const DONE_ROUTE_COMPONENT: &str = "done";

/// Storage URL that selects the in-process task store.
pub const MEMORY_DATABASE_URL: &str = "memory://";
