//! Typed client for the school records API.
//!
//! [`ApiClient`](api::ApiClient) wraps every endpoint, keeps the session
//! token returned by `/login` and feeds [`ListView`](models::list_view::ListView)s.
//! [`report`] turns a student's record into the exported document.

pub mod api;
pub mod error;
pub mod report;
pub mod resource;
pub mod session;
