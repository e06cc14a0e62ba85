// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod api_tests;
pub mod health_check;
pub mod helpers;
pub mod history_test;
pub mod marketplace_test;
pub mod proxy_image_test;
pub mod scrape_test;
pub mod search_test;
