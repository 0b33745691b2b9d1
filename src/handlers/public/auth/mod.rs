// handlers/public/auth/mod.rs - token acquisition
//
// POST /api/v1/register  create an account, returns {userID}
// POST /api/v1/login     exchange credentials for a token, returns {token}

pub mod login;
pub mod register;

pub use login::login;
pub use register::register;
