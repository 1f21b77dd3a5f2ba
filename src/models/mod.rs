mod user;
mod client;
mod project;
mod entry;

pub use user::{Session, User};
pub use client::{Client, NewClient};
pub use project::{NewProject, Project};
pub use entry::{Entry, NewEntry};
