// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod browser_session;
pub mod headless_search;
pub mod image_relay;
pub mod page_scraper;
pub mod session;

#[cfg(test)]
mod test_support;
