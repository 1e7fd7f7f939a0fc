use crate::bolos::{zlog_num, zlog_stack, Canary};
use crate::nvm::{ByteSink, DefaultBuffer};
use crate::parser::{
    split_arbitrary, split_transaction, ArbitraryMessage, ArbitraryPayload, StructuredParser,
};
use crate::view::{ArbitraryView, TransactionView};
use crate::TxError;

/// One signing session: the buffered payload, the structured parser state
/// and the arbitrary-message display state.
///
/// Both signing modes read the same buffer. Switching between them requires
/// a [`TxContext::reset`] or [`TxContext::parse_reset`] first.
pub struct TxContext<P, S = DefaultBuffer> {
    pub buffer: S,
    parser: P,
    arbitrary: ArbitraryMessage,
    canary: Canary,
    poisoned: bool,
}

impl<P: StructuredParser + Default, S: ByteSink + Default> Default for TxContext<P, S> {
    fn default() -> Self {
        Self::new(P::default(), S::default())
    }
}

/// Checks the session canary after a parser call. A smashed canary poisons
/// the session until the next [`TxContext::initialize`].
fn check_integrity(canary: &Canary, poisoned: &mut bool) -> Result<(), TxError> {
    if *poisoned || !canary.is_intact() {
        *poisoned = true;
        zlog_stack("session integrity lost\0");
        return Err(TxError::FatalIntegrity);
    }

    Ok(())
}

// A payload too short to hold the digests has no domain and no members
fn arbitrary_payload(data: &[u8]) -> ArbitraryPayload<'_> {
    split_arbitrary(data).unwrap_or_else(|_| {
        zlog_stack("arbitrary payload too short\0");
        ArbitraryPayload::empty()
    })
}

impl<P: StructuredParser, S: ByteSink> TxContext<P, S> {
    pub fn new(parser: P, buffer: S) -> Self {
        let mut ctx = TxContext {
            buffer,
            parser,
            arbitrary: ArbitraryMessage::new(),
            canary: Canary::new(),
            poisoned: false,
        };
        ctx.initialize();
        ctx
    }

    /// Brings the session to its initial state. Safe to call more than once.
    pub fn initialize(&mut self) {
        zlog_stack("tx_initialize\0");
        self.buffer.init();
        self.parser.reset();
        self.arbitrary.clear();
        self.canary.rearm();
        self.poisoned = false;
    }

    /// Drops the buffered bytes. The parsing context is kept.
    pub fn reset(&mut self) {
        zlog_stack("tx_reset\0");
        self.buffer.reset();
    }

    /// Appends a chunk to the buffer, returning how many bytes were stored.
    /// A chunk that does not fit is refused whole; retrying is up to the caller.
    pub fn append(&mut self, data: &[u8]) -> usize {
        zlog_stack("tx_append\0");
        if self.poisoned {
            return 0;
        }

        let stored = self.buffer.append(data);
        if stored != data.len() {
            zlog_num("tx_append refused: \0", data.len() as u32);
        }
        stored
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer_data(&self) -> &[u8] {
        self.buffer.data()
    }

    fn ensure_intact(&self) -> Result<(), TxError> {
        if self.poisoned {
            return Err(TxError::FatalIntegrity);
        }
        Ok(())
    }

    /// Parses and validates the buffered transaction.
    ///
    /// On rejection the error carries the parser error, whose
    /// [`TxError::description`] is meant for display.
    #[inline(never)]
    pub fn parse(&mut self) -> Result<(), TxError> {
        zlog_stack("tx_parse\0");
        self.ensure_intact()?;

        self.parser.reset();

        let data = split_transaction(self.buffer.data());

        let parsed = self.parser.parse(data);
        check_integrity(&self.canary, &mut self.poisoned)?;
        parsed.map_err(TxError::Parser)?;

        let validated = self.parser.validate(data);
        check_integrity(&self.canary, &mut self.poisoned)?;
        validated.map_err(TxError::Parser)?;

        zlog_stack("tx_parse ok\0");
        Ok(())
    }

    /// Zeroes the parsing context, leaving the buffer untouched.
    pub fn parse_reset(&mut self) {
        zlog_stack("tx_parse_reset\0");
        self.parser.reset();
    }

    pub fn num_items(&self) -> Result<u8, TxError> {
        zlog_stack("tx_num_items\0");
        self.ensure_intact()?;
        self.parser.num_items().map_err(|err| {
            zlog_num("tx_num_items failed: \0", err as u32);
            TxError::Unknown
        })
    }

    /// Renders an item of the parsed transaction.
    ///
    /// The bounds check only refuses indexes strictly greater than the item
    /// count; an index equal to the count is forwarded to the parser.
    #[inline(never)]
    pub fn get_item(
        &self,
        display_idx: i8,
        out_key: &mut [u8],
        out_value: &mut [u8],
        page_idx: u8,
    ) -> Result<u8, TxError> {
        zlog_stack("tx_get_item\0");
        let num_items = self.num_items()?;

        if i16::from(display_idx) > i16::from(num_items) {
            return Err(TxError::NoData);
        }

        let data = split_transaction(self.buffer.data());
        self.parser
            .get_item(data, display_idx, out_key, out_value, page_idx)
            .map_err(|err| {
                if err.is_out_of_range() {
                    TxError::NoData
                } else {
                    TxError::Unknown
                }
            })
    }

    fn arbitrary_payload(&self) -> ArbitraryPayload<'_> {
        arbitrary_payload(self.buffer.data())
    }

    pub fn set_arbitrary_sign_domain(&mut self, domain: &[u8]) {
        zlog_stack("tx_set_arbitrary_sign_domain\0");
        self.arbitrary.set_domain(domain);
    }

    pub fn arbitrary_sign_domain(&self) -> &[u8] {
        self.arbitrary.domain()
    }

    /// Indexes the domain and json members of a buffered arbitrary-sign
    /// request.
    #[inline(never)]
    pub fn parse_arbitrary(&mut self) -> Result<(), TxError> {
        zlog_stack("tx_parse_arbitrary\0");
        self.ensure_intact()?;

        let payload = arbitrary_payload(self.buffer.data());
        self.arbitrary.parse_items(&payload);

        check_integrity(&self.canary, &mut self.poisoned)
    }

    pub fn num_items_arbitrary(&self) -> Result<u8, TxError> {
        zlog_stack("tx_num_items_arbitrary\0");
        self.ensure_intact()?;
        Ok(ArbitraryMessage::count_items(&self.arbitrary_payload()))
    }

    /// Renders an arbitrary-sign item: `-1` is the review banner, `0` the
    /// domain and `1..` the json members.
    pub fn get_item_arbitrary(
        &self,
        display_idx: i8,
        out_key: &mut [u8],
        out_value: &mut [u8],
        page_idx: u8,
    ) -> Result<u8, TxError> {
        zlog_stack("tx_get_item_arbitrary\0");
        self.ensure_intact()?;
        self.arbitrary.get_item(
            &self.arbitrary_payload(),
            display_idx,
            out_key,
            out_value,
            page_idx,
        )
    }

    pub fn transaction_view(&self) -> TransactionView<'_, P, S> {
        TransactionView::new(self)
    }

    pub fn arbitrary_view(&self) -> ArbitraryView<'_, P, S> {
        ArbitraryView::new(self)
    }

    #[cfg(test)]
    pub(crate) fn smash_canary(&mut self) {
        self.canary.smash();
    }
}
