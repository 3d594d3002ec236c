// Public authentication handlers: account creation and session management.
// These routes require no session; everything else in the API does.

pub mod register;
pub mod session;

pub use register::register;
pub use session::{login, logout};
