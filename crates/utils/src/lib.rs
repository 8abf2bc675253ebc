pub mod password;
pub mod payload;
pub mod response;
pub mod sessions;
