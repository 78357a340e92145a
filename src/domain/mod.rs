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

//! Domain layer: resource records, the store that owns them, and the
//! injectable sources of time and randomness.

pub mod age;
pub mod config;
pub mod crd;
pub mod entropy;
pub mod model;
pub mod notifier;
pub mod seed;
pub mod store;

pub use config::SimulatorConf;
pub use entropy::{Clock, Entropy, ManualClock, SystemClock};
pub use notifier::ChangeNotifier;
pub use store::{ClusterState, ReleaseRequest, ResourceStore};
