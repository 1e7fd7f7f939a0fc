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

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "ledger")]
extern crate alloc;

pub mod bolos;
pub mod constants;
pub mod context;
pub mod nvm;
pub mod parser;
pub mod status;
pub mod utils;
pub mod view;

#[cfg(test)]
mod test_ui;

#[cfg(feature = "ledger")]
pub mod app_ui;

// Public re-exports
pub use context::TxContext;
pub use nvm::{BackingStore, ByteSink, RamStore, TieredBuffer};
pub use parser::{ArbitraryMessage, ParserError, StructuredParser};
pub use status::{AppSW, TxError};
pub use view::{ArbitraryView, TransactionView, Viewable};

#[cfg(feature = "ledger")]
pub mod ledger {
    pub use super::app_ui;
    pub use super::app_ui::review::ui_review_viewable;
    pub use super::bolos::{app_canary, zlog, zlog_stack};
    pub use super::nvm::NvmStore;
    pub use crate::context::TxContext;
}
