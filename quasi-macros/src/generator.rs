use crate::form::{Arg, Form};

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

impl ToTokens for Form {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let expanded = match self {
            Form::Nil => quote! { ::quasi::Syntax::literal(()) },
            Form::Missing => quote! { ::quasi::Syntax::missing() },
            Form::Literal(lit) => quote! { ::quasi::Syntax::literal(#lit) },
            Form::Negated(lit) => quote! { ::quasi::Syntax::literal(-#lit) },
            Form::Bool(value) => quote! { ::quasi::Syntax::literal(#value) },
            Form::Ident(name) => quote! { ::quasi::Syntax::ident(#name) },
            Form::Unquote(expr) => quote! { ::quasi::Syntax::unquote(#expr) },
            Form::UnquoteSplice(expr) => quote! { ::quasi::Syntax::unquote_splice(#expr) },
            Form::Apply(head, args) => quote! {
                ::quasi::Syntax::apply(#head, vec![#(#args),*])
            },
            Form::List(args) => quote! { ::quasi::Syntax::list(vec![#(#args),*]) },
        };
        tokens.extend(expanded);
    }
}

impl ToTokens for Arg {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let value = &self.value;
        let expanded = match &self.name {
            Some(name) => quote! { ::quasi::SyntaxArg::named(#name, #value) },
            None => quote! { ::quasi::SyntaxArg::positional(#value) },
        };
        tokens.extend(expanded);
    }
}

pub fn generate(form: Form) -> TokenStream {
    form.into_token_stream()
}
