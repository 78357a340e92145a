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

//! Flag grammar shared by every command surface.
//!
//! `--key=value` always carries a value. `--key` and two-character `-k`
//! take the following token as their value unless it is missing or starts
//! with `-`, in which case the flag is merely present. Unknown flags are
//! captured as-is; handlers decide what they mean.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Present,
    WithValue(String),
}

impl FlagValue {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            FlagValue::Present => None,
            FlagValue::WithValue(v) => Some(v),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    values: BTreeMap<String, FlagValue>,
    /// Tokens that were neither a flag nor a flag's value, in order.
    positionals: Vec<String>,
}

impl Flags {
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        Self::parse_with_switches(args, &[])
    }

    /// Like [`Flags::parse`], but the named `switches` never take a value.
    pub fn parse_with_switches<S: AsRef<str>>(args: &[S], switches: &[&str]) -> Self {
        let mut flags = Flags::default();
        let mut i = 0;

        while i < args.len() {
            let arg = args[i].as_ref();
            let key = if let Some(long) = arg.strip_prefix("--") {
                if let Some((key, value)) = long.split_once('=') {
                    flags.insert(key, FlagValue::WithValue(value.to_string()));
                    i += 1;
                    continue;
                }
                Some(long)
            } else if arg.len() == 2 && arg.starts_with('-') {
                Some(&arg[1..])
            } else {
                None
            };

            match key {
                Some(key) => {
                    let next = args.get(i + 1).map(|s| s.as_ref());
                    match next {
                        Some(value) if !value.starts_with('-') && !switches.contains(&key) => {
                            flags.insert(key, FlagValue::WithValue(value.to_string()));
                            i += 2;
                        }
                        _ => {
                            flags.insert(key, FlagValue::Present);
                            i += 1;
                        }
                    }
                }
                None => {
                    flags.positionals.push(arg.to_string());
                    i += 1;
                }
            }
        }

        flags
    }

    fn insert(&mut self, key: &str, value: FlagValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    /// Value of the first alias that carries one.
    pub fn value(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .find_map(|name| self.get(name).and_then(FlagValue::as_value))
    }

    /// True when any alias was given, with or without a value.
    pub fn present(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|name| self.values.contains_key(*name))
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }

    /// `-n` / `--namespace`
    pub fn namespace(&self) -> Option<&str> {
        self.value(&["namespace", "n"])
    }

    /// `-A` / `--all-namespaces`
    pub fn all_namespaces(&self) -> bool {
        self.present(&["all-namespaces", "A"])
    }
}
