pub mod attendance;
pub mod auth;
pub mod filter;
pub mod grades;
pub mod list_view;
pub mod options;
pub mod records;
pub mod roles;
pub mod updates;
