// Models module for the webhook handler
// Входящие и исходящие DTO

pub mod response;
pub mod telegram;
pub mod vm;

pub use response::*;
pub use telegram::*;
pub use vm::*;
