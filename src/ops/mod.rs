pub mod ids;
pub mod task_list;
pub mod view;
