// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod commands;
pub mod db;
pub mod defaults;
pub mod display;
pub mod error;
pub mod filter;
pub mod forms;
pub mod models;
pub mod overview;
pub mod query;
pub mod rates;
pub mod settings;
pub mod store;
pub mod utils;
