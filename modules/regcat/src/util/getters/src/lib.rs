// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Derive accessors for the fields of read-only model structs
//!
//! Every named field gets a `pub fn field(&self) -> &T` accessor unless it is marked
//! `#[getters(skip)]`. Fields marked `#[getters(copy)]` are returned by value and fields
//! marked `#[getters(deref)]` are returned as a reference to their `Deref` target, so a
//! `String` field is exposed as `&str` and an `Arc<[T]>` field as `&[T]`.

use darling::{ast::Data, util::Flag, Error, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, DeriveInput, Generics, Ident, Type};

#[derive(Debug, FromField)]
#[darling(attributes(getters))]
struct GettersField {
    ident: Option<Ident>,
    ty: Type,
    skip: Flag,
    copy: Flag,
    deref: Flag,
}

impl GettersField {
    fn accessor(&self) -> TokenStream2 {
        let Some(ident) = self.ident.as_ref() else {
            return Error::custom("Getters requires named fields")
                .with_span(&self.ty)
                .write_errors();
        };

        let ty = &self.ty;
        let doc = format!("Return the `{}` field", ident);

        if self.copy.is_present() && self.deref.is_present() {
            return Error::custom("`copy` and `deref` are mutually exclusive")
                .with_span(ident)
                .write_errors();
        }

        if self.copy.is_present() {
            quote! {
                #[inline(always)]
                #[doc = #doc]
                pub fn #ident(&self) -> #ty {
                    self.#ident
                }
            }
        } else if self.deref.is_present() {
            quote! {
                #[inline(always)]
                #[doc = #doc]
                pub fn #ident(&self) -> &<#ty as ::core::ops::Deref>::Target {
                    ::core::ops::Deref::deref(&self.#ident)
                }
            }
        } else {
            quote! {
                #[inline(always)]
                #[doc = #doc]
                pub fn #ident(&self) -> &#ty {
                    &self.#ident
                }
            }
        }
    }
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(getters), supports(struct_named))]
struct Getters {
    ident: Ident,
    generics: Generics,
    data: Data<(), GettersField>,
}

impl ToTokens for Getters {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let ident = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let Some(fields) = self.data.as_ref().take_struct() else {
            tokens.extend(
                Error::custom("Getters can only be derived for named structs")
                    .with_span(ident)
                    .write_errors(),
            );
            return;
        };

        let accessors = fields
            .fields
            .iter()
            .filter(|f| !f.skip.is_present())
            .map(|f| f.accessor())
            .collect::<TokenStream2>();

        tokens.extend(quote! {
            impl #impl_generics #ident #ty_generics #where_clause {
                #accessors
            }
        });
    }
}

#[proc_macro_derive(Getters, attributes(getters))]
#[allow(non_snake_case)]
/// Add read-only accessors for every field of a struct
///
/// ```rust,ignore
/// use getters::Getters;
///
/// #[derive(Getters)]
/// pub struct Bank {
///     #[getters(deref)]
///     name: String,
///     #[getters(copy)]
///     function: u64,
///     #[getters(skip)]
///     scratch: Vec<u8>,
/// }
///
/// let b = Bank { name: "regs".to_string(), function: 0, scratch: vec![] };
/// assert_eq!(b.name(), "regs");
/// assert_eq!(b.function(), 0);
/// ```
pub fn Getters(input: TokenStream) -> TokenStream {
    let getters = match Getters::from_derive_input(&parse_macro_input!(input as DeriveInput)) {
        Ok(g) => g,
        Err(e) => {
            return TokenStream::from(e.write_errors());
        }
    };

    let mut tokens = TokenStream2::new();

    getters.to_tokens(&mut tokens);

    tokens.into()
}
