use crate::context::TxContext;
use crate::nvm::ByteSink;
use crate::parser::StructuredParser;
use crate::TxError;

/// Item/page contract the display driver walks, whichever signing mode
/// produced the items.
pub trait Viewable {
    /// Index of the first item to show.
    fn first_item(&self) -> i8 {
        0
    }

    /// Items are numbered `first_item()..num_items()`.
    fn num_items(&self) -> Result<u8, TxError>;

    /// Writes the title and page `page_idx` of the message of item
    /// `item_idx`, both NUL-terminated, and returns the number of pages.
    fn render_item(
        &self,
        item_idx: i8,
        title: &mut [u8],
        message: &mut [u8],
        page_idx: u8,
    ) -> Result<u8, TxError>;
}

/// Items of a transaction decoded by the structured parser.
pub struct TransactionView<'a, P, S> {
    ctx: &'a TxContext<P, S>,
}

impl<'a, P: StructuredParser, S: ByteSink> TransactionView<'a, P, S> {
    pub fn new(ctx: &'a TxContext<P, S>) -> Self {
        TransactionView { ctx }
    }
}

impl<P: StructuredParser, S: ByteSink> Viewable for TransactionView<'_, P, S> {
    fn num_items(&self) -> Result<u8, TxError> {
        self.ctx.num_items()
    }

    fn render_item(
        &self,
        item_idx: i8,
        title: &mut [u8],
        message: &mut [u8],
        page_idx: u8,
    ) -> Result<u8, TxError> {
        self.ctx.get_item(item_idx, title, message, page_idx)
    }
}

/// Items of an arbitrary-sign request, starting with the review banner.
pub struct ArbitraryView<'a, P, S> {
    ctx: &'a TxContext<P, S>,
}

impl<'a, P: StructuredParser, S: ByteSink> ArbitraryView<'a, P, S> {
    pub fn new(ctx: &'a TxContext<P, S>) -> Self {
        ArbitraryView { ctx }
    }
}

impl<P: StructuredParser, S: ByteSink> Viewable for ArbitraryView<'_, P, S> {
    fn first_item(&self) -> i8 {
        -1
    }

    fn num_items(&self) -> Result<u8, TxError> {
        self.ctx.num_items_arbitrary()
    }

    fn render_item(
        &self,
        item_idx: i8,
        title: &mut [u8],
        message: &mut [u8],
        page_idx: u8,
    ) -> Result<u8, TxError> {
        self.ctx
            .get_item_arbitrary(item_idx, title, message, page_idx)
    }
}
