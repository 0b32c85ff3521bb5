/// Authentication utilities
///
/// - `password`: Argon2id password hashing and verification
/// - `header`: `X-User-Id` header identification (the auth stub: no
///   sessions or tokens, the client supplies its user id on every write)

pub mod header;
pub mod password;
