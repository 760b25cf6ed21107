pub mod chat;
pub mod courses;
pub mod respond;
pub mod status;
