// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreResult;
use crate::models::NewCategory;
use crate::store::RecordStore;
use tracing::info;

/// (name, icon, color)
pub const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Food", "restaurant", "#FF9800"),
    ("Transport", "directions_car", "#2196F3"),
    ("Entertainment", "movie", "#9C27B0"),
    ("Health", "local_hospital", "#F44336"),
    ("Shopping", "shopping_cart", "#E91E63"),
    ("Education", "school", "#3F51B5"),
    ("Services", "build", "#9E9E9E"),
    ("Salary", "account_balance", "#4CAF50"),
    ("Freelance", "work", "#009688"),
    ("Other", "category", "#607D8B"),
];

/// Inserts the default categories when the store has none. Returns how many were added.
pub fn seed_default_categories<S: RecordStore + ?Sized>(store: &S) -> StoreResult<usize> {
    if !store.find_categories(&|_| true)?.is_empty() {
        return Ok(0);
    }
    for (name, icon, color) in DEFAULT_CATEGORIES {
        store.insert_category(&NewCategory::new(name, icon, color))?;
    }
    info!(count = DEFAULT_CATEGORIES.len(), "default categories seeded");
    Ok(DEFAULT_CATEGORIES.len())
}
