// Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Opaque unique identifiers.
//!
//! Every vertex, edge, metadata slot and network gets a `Key` when it
//! is created. Keys are drawn from a single process-wide counter, so
//! they are unique across all graphs and threads and strictly
//! increasing in creation order.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

static NEXT_KEY: AtomicU64 = AtomicU64::new(0);

/// An opaque unique id.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Key(u64);

impl Key {
    /// Return a fresh key.
    pub fn next() -> Key {
        Key(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value of this key.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
