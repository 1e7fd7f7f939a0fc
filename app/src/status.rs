#[cfg(feature = "ledger")]
use ledger_device_sdk::io::Reply;

use nom::error::ErrorKind;

use crate::parser::ParserError;

// Application status words.
#[repr(u16)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppSW {
    ExecutionError = 0x6400,
    DataInvalid = 0x6984,
    TxWrongLength = 0xB004,
    TxParsingFail = 0xB005,
    BufferOutOfBounds = 0xB010,
    InvalidNVMWrite = 0xB021,
    IntegrityFail = 0xB030,
    Ok = 0x9000,
}

/// Caller-facing result of the transaction session.
///
/// The structured parser's taxonomy is collapsed into `NoData` and
/// `Unknown` for item iteration; `parse` keeps the parser error so its
/// description can be shown.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TxError {
    /// Index or page out of range. The caller may re-query with valid bounds.
    NoData,
    /// Any other parser failure.
    Unknown,
    /// The buffered transaction was rejected by the structured parser.
    Parser(ParserError),
    /// Session memory failed its integrity check. The session must be
    /// abandoned, nothing it holds can be trusted anymore.
    FatalIntegrity,
}

impl TxError {
    pub fn description(&self) -> &'static str {
        match self {
            TxError::NoData => "No more data",
            TxError::Unknown => "Unknown error",
            TxError::Parser(err) => err.description(),
            TxError::FatalIntegrity => "Integrity check failed",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, TxError::FatalIntegrity)
    }
}

impl From<TxError> for AppSW {
    fn from(error: TxError) -> Self {
        match error {
            TxError::NoData => AppSW::DataInvalid,
            TxError::Unknown => AppSW::ExecutionError,
            TxError::Parser(err) => AppSW::from(err),
            TxError::FatalIntegrity => AppSW::IntegrityFail,
        }
    }
}

impl From<ParserError> for AppSW {
    fn from(error: ParserError) -> Self {
        match error {
            ParserError::NoData => AppSW::DataInvalid,
            ParserError::DisplayIdxOutOfRange => AppSW::DataInvalid,
            ParserError::DisplayPageOutOfRange => AppSW::DataInvalid,
            ParserError::UnexpectedBufferEnd => AppSW::BufferOutOfBounds,
            ParserError::BufferFull => AppSW::TxWrongLength,
            ParserError::UnexpectedError => AppSW::ExecutionError,
            _ => AppSW::TxParsingFail,
        }
    }
}

#[cfg(feature = "ledger")]
impl From<AppSW> for Reply {
    fn from(sw: AppSW) -> Reply {
        Reply(sw as u16)
    }
}

impl From<ErrorKind> for AppSW {
    fn from(err: ErrorKind) -> Self {
        match err {
            ErrorKind::Eof => AppSW::BufferOutOfBounds,
            ErrorKind::TooLarge => AppSW::BufferOutOfBounds,
            ErrorKind::Tag => AppSW::TxParsingFail,
            _ => AppSW::DataInvalid,
        }
    }
}

impl<I> nom::error::ParseError<I> for AppSW {
    fn from_error_kind(_input: I, kind: ErrorKind) -> Self {
        Self::from(kind)
    }

    // No room for a backtrace on device, keep the latest reported error
    fn append(_input: I, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl From<AppSW> for nom::Err<AppSW> {
    fn from(error: AppSW) -> Self {
        nom::Err::Error(error)
    }
}

impl From<nom::Err<Self>> for AppSW {
    fn from(e: nom::Err<Self>) -> Self {
        match e {
            nom::Err::Error(e) => e,
            nom::Err::Failure(e) => e,
            nom::Err::Incomplete(_) => Self::BufferOutOfBounds,
        }
    }
}
