// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The `#[contract]` attribute macro.
//!
//! Collects the `#[requires]`, `#[ensures]` and `#[invariant]` attributes that
//! follow it and rewrites the function body into:
//!
//! ```ignore
//! ::contractum::requires!(@text "..", ..); // each #[requires], in order
//! ::contractum::invariant!(self);         // #[invariant], on entry
//! ::contractum::if_debug! { let __contract_old_0 = ..; }
//! let ret: T = (|| -> T { original body })();
//! ::contractum::ensures!(@text "..", ..);  // each #[ensures], in order
//! ::contractum::invariant!(self);         // #[invariant], on exit
//! ret
//! ```
//!
//! The closure keeps `return` and `?` meaning what they meant in the
//! original body. Everything routes through the `contractum` macros, so the
//! build flags of that crate decide what survives.
//!
//! Each clause is reported with the text the user wrote, taken from the
//! source before `old(..)` is rewritten into a snapshot binding.

use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{Attribute, Expr, ItemFn, LitStr, ReturnType, Type};

use crate::shape::ReturnShape;
use crate::snapshot::{combine, contains_old, Snapshots};

/// One `#[requires]` or `#[ensures]` condition.
struct Condition {
    expr: Expr,
    /// What a violation reports: the condition as written.
    text: LitStr,
}

impl Condition {
    fn parse(attr: &Attribute) -> syn::Result<Self> {
        let list = attr.meta.require_list()?;
        let expr = list.parse_args::<Expr>()?;
        let text = list
            .delimiter
            .span()
            .join()
            .source_text()
            .and_then(|source| {
                let inner = source.strip_prefix('(')?.strip_suffix(')')?;
                Some(inner.trim().to_string())
            })
            .unwrap_or_else(|| list.tokens.to_string());
        Ok(Condition {
            text: LitStr::new(&text, expr.span()),
            expr,
        })
    }
}

/// Clauses collected from the attributes after `#[contract]`.
#[derive(Default)]
struct Clauses {
    requires: Vec<Condition>,
    ensures: Vec<Condition>,
    invariant: Option<Span>,
}

impl Clauses {
    /// Take the contract attributes out of `attrs`, leaving the others.
    fn extract(attrs: &mut Vec<Attribute>) -> syn::Result<Self> {
        let mut clauses = Clauses::default();
        let mut errors = Vec::new();
        let mut kept = Vec::with_capacity(attrs.len());

        for attr in attrs.drain(..) {
            let path = attr.path();
            if path.is_ident("requires") {
                match Condition::parse(&attr) {
                    Ok(condition) => clauses.requires.push(condition),
                    Err(err) => errors.push(err),
                }
            } else if path.is_ident("ensures") {
                match Condition::parse(&attr) {
                    Ok(condition) => clauses.ensures.push(condition),
                    Err(err) => errors.push(err),
                }
            } else if path.is_ident("invariant") {
                match attr.meta.require_path_only() {
                    Ok(_) if clauses.invariant.is_some() => errors.push(syn::Error::new_spanned(
                        &attr,
                        "duplicate #[invariant]",
                    )),
                    Ok(_) => clauses.invariant = Some(attr.span()),
                    Err(err) => errors.push(err),
                }
            } else {
                kept.push(attr);
            }
        }

        *attrs = kept;
        combine(errors)?;
        Ok(clauses)
    }
}

/// Expand `#[contract]` applied to `item`.
pub fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(
            attr,
            "#[contract] takes no arguments; add #[requires(..)], #[ensures(..)] or #[invariant] after it",
        ));
    }

    let mut func: ItemFn = syn::parse2(item)?;
    let mut clauses = Clauses::extract(&mut func.attrs)?;
    check_signature(&func, &clauses)?;

    let mut errors = Vec::new();
    for condition in &clauses.requires {
        if contains_old(&condition.expr) {
            errors.push(syn::Error::new_spanned(
                &condition.expr,
                "old() is only available in #[ensures]",
            ));
        }
    }
    let mut snapshots = Snapshots::default();
    for condition in &mut clauses.ensures {
        if let Err(err) = snapshots.rewrite(&mut condition.expr) {
            errors.push(err);
        }
    }
    combine(errors)?;

    let requires = clauses.requires.iter().map(|Condition { expr, text }| {
        quote_spanned! {expr.span()=> ::contractum::requires!(@text #text, #expr); }
    });
    let entry_invariant = clauses.invariant.map(|span| {
        quote_spanned! {span=> ::contractum::invariant!(self); }
    });

    let exit_invariant = clauses
        .invariant
        .filter(|_| receiver_is_reference(&func))
        .map(|span| quote_spanned! {span=> ::contractum::invariant!(self); });

    let block = &func.block;
    let body = if clauses.ensures.is_empty() && exit_invariant.is_none() {
        quote! {
            #(#requires)*
            #entry_invariant
            #block
        }
    } else {
        let snapshot_bindings = snapshots.taken.iter().map(|snapshot| {
            let binding = &snapshot.binding;
            let expr = &snapshot.expr;
            quote! { let #binding = ::std::borrow::ToOwned::to_owned(&(#expr)); }
        });
        let snapshot_block = if snapshots.taken.is_empty() {
            None
        } else {
            Some(quote! { ::contractum::if_debug! { #(#snapshot_bindings)* } })
        };
        let ensures = clauses.ensures.iter().map(|Condition { expr, text }| {
            quote_spanned! {expr.span()=> ::contractum::ensures!(@text #text, #expr); }
        });
        let call = wrap_body(&func.sig.output, block);

        quote! {
            #(#requires)*
            #entry_invariant
            #snapshot_block
            #call
            #(#ensures)*
            #exit_invariant
            ret
        }
    };

    let attrs = &func.attrs;
    let vis = &func.vis;
    let sig = &func.sig;
    Ok(quote! {
        #(#attrs)*
        #vis #sig {
            #body
        }
    })
}

/// `let ret = (|| body)();`, annotated with the return type when it can be
/// written in that position.
fn wrap_body(output: &ReturnType, block: &syn::Block) -> TokenStream {
    match output {
        ReturnType::Default => quote! {
            #[allow(clippy::redundant_closure_call)]
            let ret: () = (|| #block)();
        },
        ReturnType::Type(_, ty) if ReturnShape::of(ty).nameable() => quote! {
            #[allow(clippy::redundant_closure_call)]
            let ret: #ty = (|| -> #ty #block)();
        },
        ReturnType::Type(..) => quote! {
            #[allow(clippy::redundant_closure_call)]
            let ret = (|| #block)();
        },
    }
}

fn check_signature(func: &ItemFn, clauses: &Clauses) -> syn::Result<()> {
    let sig = &func.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "#[contract] does not support async fn",
        ));
    }
    if let Some(constness) = &sig.constness {
        return Err(syn::Error::new_spanned(
            constness,
            "#[contract] does not support const fn",
        ));
    }
    if let Some(span) = clauses.invariant {
        if sig.receiver().is_none() {
            return Err(syn::Error::new(
                span,
                "#[invariant] needs a method with a self receiver",
            ));
        }
    }
    if let ReturnType::Type(_, ty) = &sig.output {
        let wraps = !clauses.ensures.is_empty() || clauses.invariant.is_some();
        if wraps && matches!(**ty, Type::Never(_)) {
            return Err(syn::Error::new_spanned(
                ty,
                "a diverging function can only carry #[requires]",
            ));
        }
        if wraps && ReturnShape::of(ty).lends_mut() {
            return Err(syn::Error::new_spanned(
                ty,
                "#[ensures] and #[invariant] cannot wrap a function returning a mutable borrow; \
                 check the borrowed value at the call site instead",
            ));
        }
    }
    Ok(())
}

/// Whether `self` is still usable after the body ran.
fn receiver_is_reference(func: &ItemFn) -> bool {
    func.sig.receiver().map_or(false, |receiver| {
        receiver.reference.is_some() || matches!(*receiver.ty, Type::Reference(_))
    })
}
