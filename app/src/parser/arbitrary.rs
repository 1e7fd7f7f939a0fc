//! Shallow json scanner for arbitrary-message signing.
//!
//! Only the top level of a flat json object is understood: keys and string
//! values are delimited by the next `"`, escapes are not honoured, array
//! values are captured whole by bracket depth and anything else runs up to
//! the next `,` or `}`. Display numbering is:
//!
//! * `-1`: "Review message" banner
//! * `0`: the signing domain
//! * `1..=N`: the indexed json members, in order

use core::cmp;

use crate::bolos::zlog_num;
use crate::constants::{
    ARBITRARY_DOMAIN_CAPACITY, DOMAIN_TITLE, MAX_JSON_ITEMS, REVIEW_MESSAGE_TITLE,
    VALUE_SCRATCH_SIZE,
};
use crate::utils::{page_string, strlen, write_str};
use crate::TxError;

use super::ArbitraryPayload;

/// Byte range inside the json region of the buffered payload.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub const fn new(start: usize, len: usize) -> Self {
        Span { start, len }
    }

    /// Bytes covered by this span, or an empty slice when the span does not
    /// fit in `data`.
    pub fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        self.start
            .checked_add(self.len)
            .and_then(|end| data.get(self.start..end))
            .unwrap_or(&[])
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct JsonItem {
    pub key: Span,
    pub value: Span,
}

/// Fixed capacity table of the members found by [`ArbitraryMessage::parse_items`].
#[derive(Clone, Copy, Default)]
pub struct JsonIndex {
    items: [JsonItem; MAX_JSON_ITEMS],
    len: usize,
}

impl JsonIndex {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == MAX_JSON_ITEMS
    }

    pub fn get(&self, idx: usize) -> Option<&JsonItem> {
        self.items[..self.len].get(idx)
    }

    pub fn clear(&mut self) {
        *self = JsonIndex::default();
    }

    fn push(&mut self, item: JsonItem) -> bool {
        let Some(slot) = self.items.get_mut(self.len) else {
            return false;
        };
        *slot = item;
        self.len += 1;
        true
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ScanState {
    SeekKey,
    InKey,
    SeekColon,
    SeekValue,
    InStringValue,
    InBracketValue(usize),
    InBareValue,
}

/// Single pass over `json` storing one entry per top-level member until the
/// input ends or `index` is full.
fn tokenize(json: &[u8], index: &mut JsonIndex) {
    let mut state = ScanState::SeekKey;
    let mut key = Span::default();
    let mut value_start = 0;

    for (pos, &c) in json.iter().enumerate() {
        if index.is_full() {
            return;
        }

        state = match state {
            ScanState::SeekKey if c == b'"' => {
                key = Span::new(pos + 1, 0);
                ScanState::InKey
            }
            ScanState::InKey if c == b'"' => {
                key.len = pos - key.start;
                ScanState::SeekColon
            }
            ScanState::SeekColon if c == b':' => ScanState::SeekValue,
            ScanState::SeekValue => match c {
                b' ' | b'\t' | b'\n' => ScanState::SeekValue,
                b'"' => {
                    value_start = pos + 1;
                    ScanState::InStringValue
                }
                b'[' => {
                    value_start = pos;
                    ScanState::InBracketValue(1)
                }
                // member with nothing before the delimiter
                b',' | b'}' => {
                    index.push(JsonItem {
                        key,
                        value: Span::new(pos, 0),
                    });
                    ScanState::SeekKey
                }
                _ => {
                    value_start = pos;
                    ScanState::InBareValue
                }
            },
            ScanState::InStringValue if c == b'"' => {
                index.push(JsonItem {
                    key,
                    value: Span::new(value_start, pos - value_start),
                });
                ScanState::SeekKey
            }
            ScanState::InBracketValue(depth) => {
                let depth = match c {
                    b'[' => depth + 1,
                    b']' => depth - 1,
                    _ => depth,
                };
                if depth == 0 {
                    // brackets are part of the value
                    index.push(JsonItem {
                        key,
                        value: Span::new(value_start, pos + 1 - value_start),
                    });
                    ScanState::SeekKey
                } else {
                    ScanState::InBracketValue(depth)
                }
            }
            ScanState::InBareValue if c == b',' || c == b'}' => {
                index.push(JsonItem {
                    key,
                    value: Span::new(value_start, pos - value_start),
                });
                ScanState::SeekKey
            }
            state => state,
        };
    }

    // Input ended in the middle of a member: keep what was seen
    let end = json.len();
    let pending = match state {
        ScanState::SeekKey => None,
        ScanState::InKey => Some(JsonItem {
            key: Span::new(key.start, end - key.start),
            value: Span::new(end, 0),
        }),
        ScanState::SeekColon | ScanState::SeekValue => Some(JsonItem {
            key,
            value: Span::new(end, 0),
        }),
        ScanState::InStringValue | ScanState::InBracketValue(_) | ScanState::InBareValue => {
            Some(JsonItem {
                key,
                value: Span::new(value_start, end - value_start),
            })
        }
    };

    if let Some(item) = pending {
        index.push(item);
    }
}

/// Display state of an arbitrary-sign request: the signing domain and the
/// positions of the json members inside the buffered payload.
///
/// Positions are only meaningful for the payload that was passed to
/// [`ArbitraryMessage::parse_items`].
#[derive(Clone, Copy)]
pub struct ArbitraryMessage {
    domain: [u8; ARBITRARY_DOMAIN_CAPACITY],
    index: JsonIndex,
}

impl Default for ArbitraryMessage {
    fn default() -> Self {
        ArbitraryMessage {
            domain: [0; ARBITRARY_DOMAIN_CAPACITY],
            index: JsonIndex::default(),
        }
    }
}

impl ArbitraryMessage {
    pub fn new() -> Self {
        ArbitraryMessage::default()
    }

    pub fn clear(&mut self) {
        *self = ArbitraryMessage::default();
    }

    /// Stores `source` as the signing domain. Anything past
    /// `ARBITRARY_DOMAIN_CAPACITY - 1` bytes is dropped silently.
    pub fn set_domain(&mut self, source: &[u8]) {
        self.domain = [0; ARBITRARY_DOMAIN_CAPACITY];
        write_str(&mut self.domain, source);
    }

    pub fn domain(&self) -> &[u8] {
        &self.domain[..strlen(&self.domain)]
    }

    pub fn index(&self) -> &JsonIndex {
        &self.index
    }

    /// Number of displayable items: one per top-level `:` plus one for the
    /// domain entry. A json without members still has the domain, so the
    /// count never goes below 1.
    #[inline(never)]
    pub fn count_items(payload: &ArbitraryPayload) -> u8 {
        let mut count: u8 = 1;
        let mut in_string = false;

        for &c in payload.json {
            if c == b'"' {
                in_string = !in_string;
            } else if !in_string && c == b':' {
                count = count.saturating_add(1);
            }
        }

        count
    }

    #[inline(never)]
    pub fn parse_items(&mut self, payload: &ArbitraryPayload) {
        self.set_domain(payload.domain);
        self.index.clear();
        tokenize(payload.json, &mut self.index);

        zlog_num("arbitrary members: \0", self.index.len() as u32);
    }

    /// Renders display item `display_idx` of `payload`.
    ///
    /// Returns the page count of the value. Members past the indexed ones
    /// report `NoData` even when they were counted.
    #[inline(never)]
    pub fn get_item(
        &self,
        payload: &ArbitraryPayload,
        display_idx: i8,
        out_key: &mut [u8],
        out_value: &mut [u8],
        page_idx: u8,
    ) -> Result<u8, TxError> {
        let num_items = Self::count_items(payload);
        if i16::from(display_idx) >= i16::from(num_items) {
            return Err(TxError::NoData);
        }

        out_key.fill(0);
        out_value.fill(0);

        if display_idx < 0 {
            write_str(out_key, REVIEW_MESSAGE_TITLE.as_bytes());
            return Ok(0);
        }

        if display_idx == 0 {
            write_str(out_key, DOMAIN_TITLE.as_bytes());
            let page_count = page_string(out_value, self.domain(), page_idx);
            return Ok(cmp::max(page_count, 1));
        }

        let item = self
            .index
            .get(display_idx as usize - 1)
            .ok_or(TxError::NoData)?;

        write_str(out_key, item.key.slice(payload.json));

        let value = item.value.slice(payload.json);
        let value = &value[..cmp::min(value.len(), VALUE_SCRATCH_SIZE - 1)];

        Ok(page_string(out_value, value, page_idx))
    }
}
