// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `old(expr)` in postconditions.
//!
//! Each `old(e)` is replaced by a fresh binding `__contract_old_N`, and `e` is
//! recorded so the caller can snapshot it on entry. Nested `old` calls are
//! rejected: there is no earlier state to take a snapshot of.

use proc_macro2::Span;
use quote::format_ident;
use syn::visit_mut::{self, VisitMut};
use syn::{Expr, ExprCall, Ident};

/// One `old(..)` occurrence: the binding that replaces it and the expression
/// evaluated on entry.
pub struct Snapshot {
    pub binding: Ident,
    pub expr: Expr,
}

/// Rewrites `old(..)` calls and collects their arguments.
#[derive(Default)]
pub struct Snapshots {
    pub taken: Vec<Snapshot>,
    errors: Vec<syn::Error>,
}

impl Snapshots {
    /// Rewrite every `old(..)` in `expr`.
    pub fn rewrite(&mut self, expr: &mut Expr) -> syn::Result<()> {
        self.visit_expr_mut(expr);
        combine(std::mem::take(&mut self.errors))
    }
}

impl VisitMut for Snapshots {
    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        let Expr::Call(call) = expr else {
            visit_mut::visit_expr_mut(self, expr);
            return;
        };
        if !is_old(call) {
            visit_mut::visit_expr_mut(self, expr);
            return;
        }
        if call.args.len() != 1 {
            self.errors.push(syn::Error::new_spanned(
                &*call,
                "old() takes exactly one expression",
            ));
            return;
        }
        let inner = call.args[0].clone();
        if contains_old(&inner) {
            self.errors.push(syn::Error::new_spanned(
                &inner,
                "old() cannot be nested",
            ));
            return;
        }

        let binding = format_ident!("__contract_old_{}", self.taken.len(), span = Span::call_site());
        *expr = syn::parse_quote!(#binding);
        self.taken.push(Snapshot {
            binding,
            expr: inner,
        });
    }
}

/// Whether `expr` mentions `old(..)` anywhere.
pub fn contains_old(expr: &Expr) -> bool {
    let mut probe = Snapshots::default();
    let mut copy = expr.clone();
    probe.visit_expr_mut(&mut copy);
    !probe.taken.is_empty() || !probe.errors.is_empty()
}

fn is_old(call: &ExprCall) -> bool {
    match &*call.func {
        Expr::Path(path) => path.qself.is_none() && path.path.is_ident("old"),
        _ => false,
    }
}

/// Fold a list of errors into one, or `Ok` when there are none.
pub fn combine(errors: Vec<syn::Error>) -> syn::Result<()> {
    let mut iter = errors.into_iter();
    match iter.next() {
        None => Ok(()),
        Some(mut first) => {
            for err in iter {
                first.combine(err);
            }
            Err(first)
        }
    }
}
