/*****************************************************************************
 *   Ledger App Algorand Rust.
 *   (c) 2018 - 2024 Zondax AG
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 *****************************************************************************/

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(any(target_os = "stax", target_os = "flex")))]
use ledger_device_sdk::ui::{
    bitmaps::{CROSSMARK, EYE, VALIDATE_14},
    gadgets::{Field, MultiFieldReview},
};

#[cfg(any(target_os = "stax", target_os = "flex"))]
use ledger_device_sdk::nbgl::{Field, NbglGlyph, NbglReview, TransactionType};

#[cfg(any(target_os = "stax", target_os = "flex"))]
use include_gif::include_gif;

use crate::bolos::{app_canary, zlog_num, zlog_stack};
use crate::utils::strlen;
use crate::view::Viewable;
use crate::{AppSW, TxError};

const TITLE_LEN: usize = 40;
const PAGE_LEN: usize = 120;

/// Collects every item of `viewable` as (title, full message) pairs.
/// Pages are joined back since the SDK review does its own paging. Items
/// without pages are left out and the first `NoData` item ends the list.
#[inline(never)]
fn collect_fields<V: Viewable>(viewable: &V) -> Result<Vec<(String, String)>, AppSW> {
    let num_items = viewable.num_items()?;
    let last = i8::try_from(num_items).unwrap_or(i8::MAX);

    let mut fields = Vec::new();
    for item_idx in viewable.first_item()..last {
        let mut title = [0u8; TITLE_LEN];
        let mut page = [0u8; PAGE_LEN];

        // counted items past the indexed ones have nothing to show
        let page_count = match viewable.render_item(item_idx, &mut title, &mut page, 0) {
            Ok(page_count) => page_count,
            Err(TxError::NoData) => break,
            Err(err) => return Err(err.into()),
        };
        if page_count == 0 {
            continue;
        }

        let mut message = String::new();
        for page_idx in 0..page_count {
            viewable.render_item(item_idx, &mut title, &mut page, page_idx)?;
            message.push_str(&String::from_utf8_lossy(&page[..strlen(&page)]));
        }

        let title = String::from_utf8_lossy(&title[..strlen(&title)]).into_owned();
        fields.push((title, message));
    }

    zlog_num("review fields: \0", fields.len() as u32);
    Ok(fields)
}

/// Shows every item of `viewable` and returns whether the user approved.
#[inline(never)]
pub fn ui_review_viewable<V: Viewable>(
    viewable: &V,
    title: &str,
    finish_title: &str,
) -> Result<bool, AppSW> {
    zlog_stack("ui_review_viewable\0");
    app_canary();

    let field_pairs = collect_fields(viewable)?;

    #[cfg(not(any(target_os = "stax", target_os = "flex")))]
    {
        let _ = finish_title;
        let fields: Vec<Field> = field_pairs
            .iter()
            .map(|(name, value)| Field {
                name: name.as_str(),
                value: value.as_str(),
            })
            .collect();

        let review_messages = [title];
        let review = MultiFieldReview::new(
            fields.as_slice(),
            &review_messages,
            Some(&EYE),
            "Approve",
            Some(&VALIDATE_14),
            "Reject",
            Some(&CROSSMARK),
        );

        Ok(review.show())
    }

    #[cfg(any(target_os = "stax", target_os = "flex"))]
    {
        #[cfg(target_os = "stax")]
        const ICON: NbglGlyph = NbglGlyph::from_include(include_gif!("stax_icon.gif", NBGL));
        #[cfg(target_os = "flex")]
        const ICON: NbglGlyph = NbglGlyph::from_include(include_gif!("flex_icon.gif", NBGL));

        let fields: Vec<Field> = field_pairs
            .iter()
            .map(|(name, value)| Field { name, value })
            .collect();

        let review = NbglReview::new()
            .tx_type(TransactionType::Transaction)
            .titles(title, "", finish_title)
            .glyph(&ICON);

        Ok(review.show(&fields))
    }
}
