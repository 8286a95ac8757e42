use darling::FromDeriveInput;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Generics, Ident, Path};

#[derive(FromDeriveInput)]
#[darling(attributes(exception), supports(struct_any, enum_any))]
struct ExceptionArgs {
    ident: Ident,
    generics: Generics,
    /// Display name of the kind, defaults to the type name
    #[darling(default)]
    name: Option<String>,
    /// Parent exception type, giving the `is_a` relation
    #[darling(default)]
    parent: Option<Path>,
}

pub fn derive_exception(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let args = match ExceptionArgs::from_derive_input(&input) {
        Ok(args) => args,
        Err(e) => return e.write_errors().into(),
    };

    TokenStream::from(generate_exception_impl(&args))
}

fn generate_exception_impl(args: &ExceptionArgs) -> TokenStream2 {
    let type_name = &args.ident;

    // A kind is one static descriptor per type, so generic types can't carry one.
    if !args.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &args.generics,
            "#[derive(Exception)] does not support generic types",
        )
        .to_compile_error();
    }

    let kind_name = args
        .name
        .clone()
        .unwrap_or_else(|| type_name.to_string());

    let parent = match &args.parent {
        Some(path) => quote! {
            ::core::option::Option::Some(
                <#path as ::meshestra_exceptions::Exception>::KIND
            )
        },
        None => quote!(::core::option::Option::None),
    };

    quote! {
        impl ::meshestra_exceptions::Exception for #type_name {
            const KIND: &'static ::meshestra_exceptions::Kind =
                &::meshestra_exceptions::Kind::new::<#type_name>(#kind_name, #parent);
        }
    }
}
