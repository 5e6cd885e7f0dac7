#[derive(Debug)]
pub enum Form {
    Nil,
    Missing,
    Literal(proc_macro2::Literal),
    Negated(proc_macro2::Literal),
    Bool(bool),
    Ident(String),
    Unquote(Box<Form>),
    UnquoteSplice(Box<Form>),
    Apply(Box<Form>, Vec<Arg>),
    List(Vec<Arg>),
}

#[derive(Debug)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Form,
}
