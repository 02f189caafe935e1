//! # Word Map
//!
//! Three map structures behind one interface, and a word replacement tool
//! built on top of them.
//!
//! This crate provides three map implementations:
//!
//! - `ChainedHashMap`: A hash table with separate chaining that grows through a fixed sequence of prime capacities
//! - `BsTreeMap`: An unbalanced binary search tree, with traversals, search cost statistics and an ASCII drawing
//! - `RbTreeMap`: A red-black tree with the same interface as `BsTreeMap`
//!
//! All of them implement the [`Map`] trait, and [`AnyMap`] picks one at runtime
//! from a [`Backend`] name (`hash`, `bst` or `rbt`).
//!
//! ## Basic Usage
//!
//! ```rust
//! use wordmap::ChainedHashMap;
//!
//! // Create a new hash map
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.insert("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Word Replacement
//!
//! ```rust
//! use wordmap::{Backend, parse_rules, replace_words, resolve_rules};
//!
//! // Rules compose: "big" ends up replaced by "huge"
//! let rules = parse_rules("big -> large\nlarge -> huge\n").unwrap();
//! let map = resolve_rules(rules, Backend::Hash).unwrap();
//!
//! assert_eq!(replace_words("A big, large house.", &map), "A huge, huge house.");
//!
//! // A rule that closes a cycle is rejected
//! assert!(resolve_rules([("a", "b"), ("b", "a")], Backend::Tree).is_err());
//! ```

/// Index-addressed node storage shared by the chains and the trees
mod arena;
/// Module implementing the separate-chaining hash map
mod chained_hashmap;
/// Shared `<key, value>` rendering
mod entry;
/// Error types
mod error;
/// The `Map` trait and the runtime-selected `AnyMap`
mod map;
/// Replacement rule parsing and chain resolution
mod resolver;
/// Word substitution over text
mod substitute;
/// Module implementing the binary search tree and red-black tree maps
mod tree;
/// Utility functions and traits for every map
mod utils;

pub use chained_hashmap::{ChainedHashMap, Iter as HashIter};
pub use error::{MapError, ResolveError, Result};
pub use map::{AnyIter, AnyMap, Backend, Map};
pub use resolver::{RuleResolver, parse_rules, resolve_rules};
pub use substitute::replace_words;
pub use tree::{BsTreeMap, Iter as TreeIter, RbTreeMap, Traversal, TreeStats};
pub use utils::{MapExtensions, collect_into};
