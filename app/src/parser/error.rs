/// Error taxonomy of the structured transaction parser.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParserError {
    // Generic errors
    NoData = 1,
    InitContextEmpty,
    DisplayIdxOutOfRange,
    DisplayPageOutOfRange,
    UnexpectedError,
    // Coding
    UnexpectedType,
    UnexpectedBufferEnd,
    UnexpectedValue,
    UnexpectedNumberItems,
    UnexpectedField,
    ValueOutOfRange,
    BufferFull,
    // Transaction content
    InvalidAddress,
    DuplicatedField,
    MissingField,
    UnknownTxType,
}

impl ParserError {
    pub fn description(&self) -> &'static str {
        match self {
            ParserError::NoData => "No more data",
            ParserError::InitContextEmpty => "Initialized empty context",
            ParserError::DisplayIdxOutOfRange => "display_idx_out_of_range",
            ParserError::DisplayPageOutOfRange => "display_page_out_of_range",
            ParserError::UnexpectedError => "Unexpected error",
            ParserError::UnexpectedType => "Unexpected type",
            ParserError::UnexpectedBufferEnd => "Unexpected buffer end",
            ParserError::UnexpectedValue => "Unexpected value",
            ParserError::UnexpectedNumberItems => "Unexpected number of items",
            ParserError::UnexpectedField => "Unexpected field",
            ParserError::ValueOutOfRange => "Value out of range",
            ParserError::BufferFull => "Buffer full",
            ParserError::InvalidAddress => "Invalid address",
            ParserError::DuplicatedField => "Duplicated field",
            ParserError::MissingField => "Missing field",
            ParserError::UnknownTxType => "Unknown transaction type",
        }
    }

    /// Errors that only say the requested item or page does not exist.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            ParserError::NoData
                | ParserError::DisplayIdxOutOfRange
                | ParserError::DisplayPageOutOfRange
        )
    }
}
