//! Label-dispatched interpreters and transformers for parse trees.
//!
//! ------------------------
//!
//! # Overview
//! Parsers usually hand their result over as a tree of labeled nodes, where the label names the grammar rule which produced the node and the children are either nested nodes or raw tokens. Kindling provides that tree type, [`Tree`], along with two ways of walking it which pick what to do with each node by looking at its label:
//! - [`Interpreter`] — *top-down and lazy*: the handler for a label receives the raw node and decides itself whether, when and in what order to descend into its children. This is the right tool for evaluators of languages with short-circuiting operators, conditionals or loops, where some subtrees must not be evaluated at all.
//! - [`Transformer`] — *bottom-up and eager*: all children are transformed first, and the handler for a label receives the already transformed children and returns the value which replaces the node. This is the right tool for building ASTs, folding constants or computing anything which is a pure function of the subtrees.
//!
//! Handlers are bound to labels on a builder, with no reflection or naming conventions involved. Labels without a handler get a built-in fallback: interpreters descend into them transparently, and transformers rebuild them around their transformed children by default.
//!
//! # Calling conventions
//! Natively, interpreter handlers take the interpreter and the node, and transformer handlers take the transformer and the sequence of transformed children. The [`adapter`] module additionally lets any function taking *the children as positional arguments* be bound to a label — a string parser for a token rule or a binary operator for an arithmetic rule, for example — with the arguments converted from the traversal's value type and the number of children checked against the number of parameters at dispatch time.
//!
//! # Values
//! Traversals are generic over the type their handlers return, which only has to implement [`TreeValue`]. The crate ships a dynamically typed [`Value`] which implements it, along with conversions from and into Rust primitives and checked arithmetic, which makes it a good fit for quick evaluators and for tests.
//!
//! # Feature flags
//! - `serde` (**enabled by default**) — implements `Serialize` and `Deserialize` for [`Tree`], [`Child`] and [`Value`], which allows trees to be stored and sent across process boundaries with any Serde format.
//! - `doc_cfg` — uses the nightly `doc_cfg` feature to mark feature-gated items in the documentation. Only useful for building documentation.
//!
//! # Public dependencies
//! - `arrayvec` (**required**) — `^0.5`
//! - `serde` (*optional*) — `^1.0`
//!
//! # Example
//! ```rust
//! use kindling::prelude::*;
//!
//! // add(sub(i('3'), f('1.1')), i('1'))
//! let tree = Tree::new("add", [
//!     Tree::new("sub", [
//!         Tree::with_leaves("i", ["3".to_owned()]).into(),
//!         Tree::with_leaves("f", ["1.1".to_owned()]).into(),
//!     ])
//!     .into(),
//!     Tree::with_leaves("i", ["1".to_owned()]).into(),
//! ]);
//! let calc = Transformer::<String, Value>::builder()
//!     .inlined()
//!     .rule("i", |s: String| s.parse::<i64>())
//!     .rule("f", |s: String| s.parse::<f64>())
//!     .rule("sub", |a: Value, b: Value| a - b)
//!     .rule("add", |a: Value, b: Value| a + b)
//!     .finish()
//!     .build();
//! let result = f64::try_from(tree.traverse(&calc)?)?;
//! assert!((result - 2.9).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Tree`]: tree/struct.Tree.html " "
//! [`Child`]: tree/enum.Child.html " "
//! [`Interpreter`]: interpreter/struct.Interpreter.html " "
//! [`Transformer`]: transformer/struct.Transformer.html " "
//! [`adapter`]: adapter/index.html " "
//! [`TreeValue`]: value/trait.TreeValue.html " "
//! [`Value`]: value/enum.Value.html " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::copy_iterator,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::fn_params_excessive_bools,
    clippy::implicit_hasher,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::let_unit_value,
    clippy::macro_use_imports,
    clippy::match_same_arms,
    clippy::match_wild_err_arm,
    clippy::match_wildcard_for_single_variants,
    // sick of this stupid lint, disabling
    // clippy::module_name_repetitions,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::same_functions_in_if_condition,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::string_add_assign,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

pub mod tree;
pub use tree::{Tree, Child};

pub mod value;
pub use value::{Value, TreeValue, ValueError};

pub mod error;
pub use error::{Error, Result};

pub mod dispatch;
pub use dispatch::{Handlers, Resolved, Traversal};

pub mod adapter;
pub use adapter::{InlineFn, InlineMethod, InlineRegistrar, Inlined};

pub mod interpreter;
pub use interpreter::{Interpreter, InterpreterBuilder};

pub mod transformer;
pub use transformer::{Transformer, TransformerBuilder, MissingHandlerPolicy, Chain};

/// A prelude for using Kindling, containing the most used types and traits for glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{
        tree::{Tree, Child},
        value::{Value, TreeValue},
        error::Error as TraversalError,
        dispatch::Traversal,
        adapter::InlineRegistrar,
        interpreter::Interpreter,
        transformer::{Transformer, MissingHandlerPolicy},
    };
}
