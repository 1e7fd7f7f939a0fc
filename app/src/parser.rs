mod arbitrary;
mod error;
mod payload;

pub use arbitrary::{ArbitraryMessage, JsonIndex, JsonItem, Span};
pub use error::ParserError;
pub use payload::{split_arbitrary, split_transaction, ArbitraryPayload};

/// Narrow interface to the structured transaction parser.
///
/// The parser keeps its model as offsets into the transaction bytes, so
/// every call that reads field content receives the same `data` slice that
/// was handed to [`StructuredParser::parse`]. The session guarantees the
/// slice does not change between `parse` and the item queries.
pub trait StructuredParser {
    /// Zero the parsing context, dropping any previously parsed model.
    fn reset(&mut self);

    /// Decode `data` into the parsing context.
    fn parse(&mut self, data: &[u8]) -> Result<(), ParserError>;

    /// Run the semantic checks over the decoded model.
    fn validate(&mut self, data: &[u8]) -> Result<(), ParserError>;

    /// Number of display items of the parsed transaction.
    fn num_items(&self) -> Result<u8, ParserError>;

    /// Render item `display_idx` into `key` and page `page_idx` of its value
    /// into `value`, both NUL-terminated. Returns the value page count.
    fn get_item(
        &self,
        data: &[u8],
        display_idx: i8,
        key: &mut [u8],
        value: &mut [u8],
        page_idx: u8,
    ) -> Result<u8, ParserError>;
}
