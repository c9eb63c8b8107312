// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::defaults::seed_default_categories;
use crate::store::SqliteStore;
use anyhow::Result;
use std::path::Path;

pub fn handle(store: &SqliteStore, path: &Path) -> Result<()> {
    let seeded = seed_default_categories(store)?;
    println!("Database initialized at {}", path.display());
    if seeded > 0 {
        println!("Added {} default categories", seeded);
    }
    Ok(())
}
