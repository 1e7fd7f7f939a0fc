//! Display driver used by the tests: walks every item and page of a
//! [`Viewable`] the way the device UI does.

use std::string::String;
use std::vec::Vec;

use crate::utils::strlen;
use crate::view::Viewable;
use crate::TxError;

#[derive(Clone, PartialEq, Eq)]
pub struct ReducedPage {
    pub title: String,
    pub message: String,
    pub page: String,
}

impl core::fmt::Debug for ReducedPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} [{}]: {}", self.title, self.page, self.message)
    }
}

fn as_string(raw: &[u8]) -> String {
    String::from_utf8_lossy(&raw[..strlen(raw)]).into_owned()
}

pub struct MockDriver<V, const TITLE: usize, const MESSAGE: usize> {
    viewable: V,
    pages: Vec<ReducedPage>,
}

impl<V: Viewable, const TITLE: usize, const MESSAGE: usize> MockDriver<V, TITLE, MESSAGE> {
    pub fn new(viewable: V) -> Self {
        MockDriver {
            viewable,
            pages: Vec::new(),
        }
    }

    /// Renders every page of every item. Items without pages still show
    /// their title once. The first item reporting `NoData` ends the list.
    pub fn drive(&mut self) -> Result<(), TxError> {
        let num_items = self.viewable.num_items()?;
        let first = self.viewable.first_item();

        let last = i8::try_from(num_items).unwrap_or(i8::MAX);

        for item_idx in first..last {
            let mut title = [0u8; TITLE];
            let mut message = [0u8; MESSAGE];

            let page_count = match self
                .viewable
                .render_item(item_idx, &mut title, &mut message, 0)
            {
                Ok(page_count) => page_count,
                Err(TxError::NoData) => break,
                Err(err) => return Err(err),
            };

            if page_count == 0 {
                self.pages.push(ReducedPage {
                    title: as_string(&title),
                    message: String::new(),
                    page: String::from("0/0"),
                });
                continue;
            }

            for page_idx in 0..page_count {
                self.viewable
                    .render_item(item_idx, &mut title, &mut message, page_idx)?;
                self.pages.push(ReducedPage {
                    title: as_string(&title),
                    message: as_string(&message),
                    page: std::format!("{}/{}", page_idx + 1, page_count),
                });
            }
        }

        Ok(())
    }

    pub fn out_ui(&self) -> &[ReducedPage] {
        &self.pages
    }
}
