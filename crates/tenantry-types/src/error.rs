//! Workspace-wide error type.
//!
//! Lookup misses are never errors: operations that can legitimately find
//! nothing return `Ok(None)` or `Ok(false)`. The variants here are the hard
//! failures that abort an operation.

pub type TnResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// The backing store failed. Details are logged at the call site before
	/// the error is mapped, so this variant carries none.
	DbError,
	/// One message per violated registration/update constraint.
	Validation(Vec<String>),
	/// A tenant with this url_prefix already exists.
	DuplicateTenant,
	/// Update request without a usable target id.
	MalformedRequest,
	/// The store did not assign an id to the newly created tenant.
	CreateFailed,
	/// A broken invariant inside this crate, not a caller mistake.
	Internal(String),
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::DbError => write!(f, "database error"),
			Error::Validation(errors) => write!(f, "{}", errors.join(", ")),
			Error::DuplicateTenant => write!(f, "tenant with this url prefix already exists"),
			Error::MalformedRequest => write!(f, "malformed update request"),
			Error::CreateFailed => write!(f, "tenant failed to create"),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

// vim: ts=4
