pub mod auth;
pub mod response;

pub use auth::{
    build_session_cookie, clear_session_cookie, require_admin, require_donor, require_receiver,
    require_session, session_token_from_headers, CurrentUser, SESSION_COOKIE,
};
pub use response::{ApiResponse, ApiResult};
