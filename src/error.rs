use thiserror::Error;

/// Why a delimited category record could not be read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
	#[error("category record has {found} fields, expected at least {expected}")]
	MissingFields { found: usize, expected: usize },

	#[error("field `{field}` is not a number: {value:?}")]
	InvalidNumber { field: &'static str, value: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResetError {
	#[error("category {0} is not in the expected list")]
	UnknownCategory(i64),

	#[error("not enough free funds: {available} available, {requested} requested")]
	InsufficientFunds { available: f64, requested: f64 },

	#[error("cannot allocate a negative amount: {0}")]
	NegativeAmount(f64),

	#[error(transparent)]
	Record(#[from] RecordError),
}

/// A widget container whose markup is incomplete. The container is
/// skipped, the rest of the page is unaffected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MountError {
	#[error("required element `{0}` is missing")]
	MissingElement(&'static str),

	#[error("the browser does not support template elements")]
	TemplatesUnsupported,

	#[error(transparent)]
	Reset(#[from] ResetError),
}
