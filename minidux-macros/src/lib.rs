//! Procedural macros for minidux

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Naming convention for generated names ("snake_case" or
    /// "SCREAMING_SNAKE_CASE"); variant names are used verbatim otherwise
    #[darling(default)]
    rename_all: Option<String>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit name override
    #[darling(default)]
    name: Option<String>,

    /// Marks the store initialization sentinel
    #[darling(default)]
    init: bool,
}

/// Split a PascalCase string into parts
fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            parts.push(current);
            current = String::new();
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    split_pascal_case(s)
        .iter()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

fn apply_rename(rule: &str, variant: &str) -> Option<String> {
    match rule {
        "snake_case" => Some(to_snake_case(variant)),
        "SCREAMING_SNAKE_CASE" => Some(to_snake_case(variant).to_uppercase()),
        _ => None,
    }
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name as a static string.
///
/// Attributes:
/// - `#[action(rename_all = "SCREAMING_SNAKE_CASE")]` on the enum changes how
///   names are generated (`AddTodo` becomes `"ADD_TODO"`); `"snake_case"` is
///   also accepted
/// - `#[action(name = "...")]` on a variant overrides its name
/// - `#[action(init)]` on exactly one unit variant implements `InitAction`,
///   making that variant the sentinel the store reduces on creation
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(rename_all = "SCREAMING_SNAKE_CASE")]
/// enum TodoAction {
///     #[action(init, name = "@@INIT")]
///     Init,
///     AddTodo(Todo),
///     RemoveTodo { id: String },
/// }
///
/// assert_eq!(TodoAction::Init.name(), "@@INIT");
/// assert_eq!(TodoAction::RemoveTodo { id: "1".into() }.name(), "REMOVE_TODO");
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    if let Some(rule) = &opts.rename_all {
        if apply_rename(rule, "Probe").is_none() {
            return syn::Error::new_spanned(
                &input.ident,
                format!(
                    "unsupported rename_all rule {:?}, expected \"snake_case\" or \"SCREAMING_SNAKE_CASE\"",
                    rule
                ),
            )
            .to_compile_error()
            .into();
        }
    }

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let ident_str = variant_name.to_string();
        let variant_str = v
            .name
            .clone()
            .or_else(|| {
                opts.rename_all
                    .as_deref()
                    .and_then(|rule| apply_rename(rule, &ident_str))
            })
            .unwrap_or(ident_str);

        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #variant_str
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #variant_str
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #variant_str
            },
        }
    });

    let mut expanded = quote! {
        impl #impl_generics minidux::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    let init_variants: Vec<_> = variants.iter().filter(|v| v.init).collect();
    match init_variants.as_slice() {
        [] => {}
        [variant] => {
            if !matches!(variant.fields.style, darling::ast::Style::Unit) {
                return syn::Error::new_spanned(
                    &variant.ident,
                    "#[action(init)] can only mark a unit variant",
                )
                .to_compile_error()
                .into();
            }
            let init_ident = &variant.ident;
            expanded = quote! {
                #expanded

                impl #impl_generics minidux::InitAction for #name #ty_generics #where_clause {
                    fn init() -> Self {
                        #name::#init_ident
                    }
                }
            };
        }
        [_, second, ..] => {
            return syn::Error::new_spanned(
                &second.ident,
                "only one variant can be marked #[action(init)]",
            )
            .to_compile_error()
            .into();
        }
    }

    TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pascal_case() {
        assert_eq!(split_pascal_case("AddTodo"), vec!["Add", "Todo"]);
        assert_eq!(split_pascal_case("Init"), vec!["Init"]);
    }

    #[test]
    fn test_rename_rules() {
        assert_eq!(apply_rename("snake_case", "ToggleTodo").as_deref(), Some("toggle_todo"));
        assert_eq!(
            apply_rename("SCREAMING_SNAKE_CASE", "RemoveGoal").as_deref(),
            Some("REMOVE_GOAL")
        );
        assert_eq!(apply_rename("kebab-case", "AddGoal"), None);
    }
}
