// handlers/mod.rs - two security tiers
//
// public:    no token required (/api/v1/login, /api/v1/register, /health)
// protected: token required, AuthUser extracted from the request

pub mod health;
pub mod protected;
pub mod public;
