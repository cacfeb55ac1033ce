pub mod analysis;
pub mod auth;
pub mod history;
pub mod jd;
