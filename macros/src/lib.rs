// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Procedural macros for `contractum`.
//!
//! One attribute, `#[contract]`, that turns clause attributes on a function
//! into the corresponding `contractum` checks. The checks themselves are the
//! `macro_rules!` constructs of the main crate, so whether they survive
//! compilation is decided by its build flags, not here.
//!
//! Use it through the re-export `contractum::contract`.

use proc_macro::TokenStream;

mod contract;
mod shape;
mod snapshot;

/// Attach contract clauses to a function or method.
///
/// # Clauses
///
/// Written as attributes *after* `#[contract]`:
///
/// - `#[requires(expr)]` - precondition, checked on entry (repeatable)
/// - `#[ensures(expr)]` - postcondition, checked on exit (repeatable). `ret`
///   is the return value, `old(e)` is `e` as it was on entry
/// - `#[invariant]` - `invariant!(self)` on entry, and on exit when `self`
///   is borrowed
///
/// # Example
///
/// ```ignore
/// #[contract]
/// #[requires(!self.items.is_empty())]
/// #[ensures(self.items.len() == old(self.items.len()) - 1)]
/// #[ensures(ret.is_some())]
/// #[invariant]
/// fn pop(&mut self) -> Option<Item> {
///     self.items.pop()
/// }
/// ```
///
/// # Limitations
///
/// - not for `async fn` or `const fn`
/// - the body runs in a closure; when the return type contains `impl Trait`
///   that closure cannot be annotated, so `?` in the body may need help
/// - `old(e)` takes a `ToOwned` copy of `e`, only when checks are enabled
/// - with `#[ensures]` or `#[invariant]`, the return type may not hold a
///   `&mut` borrow, since it cannot escape the closure; `#[requires]` alone
///   is fine
/// - a failing clause reports its text as written, `old(..)` included
#[proc_macro_attribute]
pub fn contract(attr: TokenStream, item: TokenStream) -> TokenStream {
    contract::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
