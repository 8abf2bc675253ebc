pub mod budget;
pub mod guest;
pub mod milestone;
pub mod note;
pub mod payment;
pub mod planning_task;
pub mod user;
pub mod vendor;
