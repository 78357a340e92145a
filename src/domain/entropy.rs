// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Injectable sources of time and randomness.

use crate::infrastructure::constants::{
    EXTERNAL_SUBNET_PREFIX, HASH_ALPHABET, NODE_PORT_MAX, NODE_PORT_MIN, POD_SUBNET_PREFIX,
    POD_SUBNET_THIRD_OCTETS, SERVICE_SUBNET_PREFIX,
};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::cell::Cell;
use std::rc::Rc;

/// Wall clock in epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_millis)),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

/// Generator for every random-looking value the store fabricates.
pub struct Entropy {
    rng: Box<dyn RngCore>,
}

impl Entropy {
    pub fn new(rng: Box<dyn RngCore>) -> Self {
        Self { rng }
    }

    pub fn from_entropy() -> Self {
        Self::new(Box::new(StdRng::from_entropy()))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn hash(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| HASH_ALPHABET[self.rng.gen_range(0..HASH_ALPHABET.len())] as char)
            .collect()
    }

    /// Pod address in the fixed pod subnet.
    pub fn pod_ip(&mut self) -> String {
        format!(
            "{}.{}.{}",
            POD_SUBNET_PREFIX,
            self.rng.gen_range(0..POD_SUBNET_THIRD_OCTETS),
            self.rng.gen_range(1..=254u8)
        )
    }

    pub fn cluster_ip(&mut self) -> String {
        format!(
            "{}.{}.{}",
            SERVICE_SUBNET_PREFIX,
            self.rng.gen_range(1..=254u8),
            self.rng.gen_range(1..=254u8)
        )
    }

    pub fn external_ip(&mut self) -> String {
        format!("{}.{}", EXTERNAL_SUBNET_PREFIX, self.rng.gen_range(1..=254u8))
    }

    pub fn node_port(&mut self) -> u16 {
        self.rng.gen_range(NODE_PORT_MIN..=NODE_PORT_MAX)
    }

    /// Picks one element, `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.rng.gen_range(0..items.len()))
        }
    }
}

impl std::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entropy").finish_non_exhaustive()
    }
}
