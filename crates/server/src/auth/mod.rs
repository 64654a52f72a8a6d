pub mod bootstrap;
pub mod extract;
pub mod password;
pub mod token;
