// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What a return type allows the generated code to write.
//!
//! The wrapped body is annotated with the function's return type so `?` has
//! a target to convert into. That is impossible when the type contains
//! `impl Trait`, which is only legal in the function signature itself.
//!
//! A mutable borrow cannot leave the closure at all: the closure holds its
//! captures by unique borrow, and nothing reborrowed through them may escape.

use syn::{GenericArgument, PathArguments, ReturnType, Type};

/// Properties of a function's return type relevant to body wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnShape {
    impl_trait: bool,
    mut_borrow: bool,
}

impl ReturnShape {
    pub fn of(ty: &Type) -> Self {
        ReturnShape {
            impl_trait: mentions(ty, &|ty| matches!(ty, Type::ImplTrait(_))),
            mut_borrow: mentions(ty, &|ty| {
                matches!(ty, Type::Reference(reference) if reference.mutability.is_some())
            }),
        }
    }

    /// Whether the type can be spelled in a `let` or closure annotation.
    pub fn nameable(self) -> bool {
        !self.impl_trait
    }

    /// Whether the value holds a `&mut` borrow somewhere inside it.
    pub fn lends_mut(self) -> bool {
        self.mut_borrow
    }
}

/// Whether `hit` accepts `ty` or any type nested in it.
fn mentions(ty: &Type, hit: &dyn Fn(&Type) -> bool) -> bool {
    if hit(ty) {
        return true;
    }
    match ty {
        Type::Array(array) => mentions(&array.elem, hit),
        Type::Group(group) => mentions(&group.elem, hit),
        Type::Paren(paren) => mentions(&paren.elem, hit),
        Type::Ptr(ptr) => mentions(&ptr.elem, hit),
        Type::Reference(reference) => mentions(&reference.elem, hit),
        Type::Slice(slice) => mentions(&slice.elem, hit),
        Type::Tuple(tuple) => tuple.elems.iter().any(|elem| mentions(elem, hit)),
        Type::Path(path) => path
            .path
            .segments
            .iter()
            .any(|segment| arguments_mention(&segment.arguments, hit)),
        _ => false,
    }
}

fn arguments_mention(arguments: &PathArguments, hit: &dyn Fn(&Type) -> bool) -> bool {
    match arguments {
        PathArguments::None => false,
        PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| match arg {
            GenericArgument::Type(ty) => mentions(ty, hit),
            GenericArgument::AssocType(assoc) => mentions(&assoc.ty, hit),
            _ => false,
        }),
        PathArguments::Parenthesized(args) => {
            args.inputs.iter().any(|input| mentions(input, hit))
                || matches!(&args.output, ReturnType::Type(_, ty) if mentions(ty, hit))
        }
    }
}
