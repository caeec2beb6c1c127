pub mod blog;
pub mod community;
mod home;
pub mod project;

pub(crate) use home::*;
