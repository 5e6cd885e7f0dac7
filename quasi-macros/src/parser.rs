use crate::form::{Arg, Form};

use proc_macro2::{Delimiter, Literal, Spacing, TokenStream, TokenTree};

#[derive(Debug)]
struct Parser {
    tokens: Vec<TokenTree>,
    index: usize,
}

#[derive(Debug)]
pub enum ParseError {
    ExpectedStringLiteral(Literal),
    UnexpectedToken(TokenTree),
    UnexpectedChar(char),
    UnexpectedDelimiter(Delimiter),
    MisplacedName(String),
    MissingValue(String),
    TrailingTokens,
    UnexpectedEnd,
}

// A parsed item: either an expression or the name of the argument that
// follows it.
enum Item {
    Form(Form),
    Name(String),
}

impl Parser {
    fn new(tokens: Vec<TokenTree>) -> Self {
        Parser { tokens, index: 0 }
    }

    fn next_token(&mut self) -> Option<&TokenTree> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    fn token(&mut self) -> Result<&TokenTree, ParseError> {
        self.next_token().ok_or(ParseError::UnexpectedEnd)
    }

    fn peek(&self) -> Option<&TokenTree> {
        self.tokens.get(self.index)
    }

    fn eat_token(&mut self) {
        assert!(self.index < self.tokens.len());
        self.index += 1;
    }

    fn parse(&mut self) -> Result<Form, ParseError> {
        match self.parse_item()? {
            Item::Form(form) => Ok(form),
            Item::Name(name) => Err(ParseError::MisplacedName(name)),
        }
    }

    fn parse_item(&mut self) -> Result<Item, ParseError> {
        match self.token()? {
            TokenTree::Punct(punct) => match punct.as_char() {
                '#' => self.parse_octothorpe(),
                ',' => self.parse_unquote().map(Item::Form),
                c @ ('!' | '$' | '%' | '&' | '*' | '+' | '-' | '.' | '/' | ':' | '<' | '='
                | '>' | '?' | '@' | '^' | '|' | '~') => match punct.spacing() {
                    Spacing::Joint => Ok(Item::Form(Form::Ident(
                        self.parse_identifier(c.to_string()),
                    ))),
                    Spacing::Alone => match c {
                        '-' => match self.peek() {
                            Some(TokenTree::Literal(lit)) => {
                                let lit = lit.clone();
                                self.eat_token();
                                Ok(Item::Form(Form::Negated(lit)))
                            }
                            _ => Ok(Item::Form(Form::Ident(c.to_string()))),
                        },
                        ':' => self.parse_name(),
                        _ => Ok(Item::Form(Form::Ident(c.to_string()))),
                    },
                },
                c => Err(ParseError::UnexpectedChar(c)),
            },
            TokenTree::Literal(literal) => Ok(Item::Form(Form::Literal(literal.clone()))),
            TokenTree::Ident(ident) => Ok(Item::Form(Form::Ident(ident.to_string()))),
            TokenTree::Group(group) => match group.delimiter() {
                Delimiter::Parenthesis => parse_application(group.stream()).map(Item::Form),
                delim => Err(ParseError::UnexpectedDelimiter(delim)),
            },
        }
    }

    fn parse_unquote(&mut self) -> Result<Form, ParseError> {
        if let Some(TokenTree::Punct(punct)) = self.peek() {
            if punct.as_char() == '@' {
                self.eat_token();
                return Ok(Form::UnquoteSplice(Box::new(self.parse()?)));
            }
        }
        Ok(Form::Unquote(Box::new(self.parse()?)))
    }

    fn parse_identifier(&mut self, prefix: String) -> String {
        let mut identifier = prefix;
        while let Some(token) = self.peek() {
            match token {
                TokenTree::Punct(punct) => match punct.as_char() {
                    '!' | '$' | '%' | '&' | '*' | '+' | '-' | '.' | '/' | ':' | '<' | '=' | '>'
                    | '?' | '@' | '^' | '|' | '~' => {
                        identifier.push(punct.as_char());
                        let spacing = punct.spacing();
                        self.eat_token();
                        match spacing {
                            Spacing::Joint => {}
                            Spacing::Alone => break,
                        }
                    }
                    _ => break,
                },
                TokenTree::Ident(part) => {
                    identifier.push_str(&part.to_string());
                    self.eat_token();
                    break;
                }
                _ => break,
            }
        }
        identifier
    }

    fn parse_name(&mut self) -> Result<Item, ParseError> {
        match self.peek() {
            Some(TokenTree::Literal(lit)) => {
                let name = string_literal(lit)?;
                self.eat_token();
                Ok(Item::Name(name))
            }
            Some(TokenTree::Ident(ident)) => {
                let name = ident.to_string();
                self.eat_token();
                Ok(Item::Name(name))
            }
            Some(token) => Err(ParseError::UnexpectedToken(token.clone())),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn parse_octothorpe(&mut self) -> Result<Item, ParseError> {
        let token = self.token()?;
        match token {
            TokenTree::Punct(punct) => match punct.as_char() {
                ':' => self.parse_name(),
                c => Err(ParseError::UnexpectedChar(c)),
            },
            TokenTree::Literal(lit) => Ok(Item::Form(Form::Ident(string_literal(lit)?))),
            TokenTree::Ident(ident) => match ident.to_string().as_str() {
                "t" => Ok(Item::Form(Form::Bool(true))),
                "f" => Ok(Item::Form(Form::Bool(false))),
                "nil" => Ok(Item::Form(Form::Nil)),
                "missing" => Ok(Item::Form(Form::Missing)),
                _ => Err(ParseError::UnexpectedToken(token.clone())),
            },
            TokenTree::Group(group) => match group.delimiter() {
                Delimiter::Parenthesis => parse_args(group.stream()).map(Form::List).map(Item::Form),
                delim => Err(ParseError::UnexpectedDelimiter(delim)),
            },
        }
    }
}

fn string_literal(lit: &Literal) -> Result<String, ParseError> {
    let s = lit.to_string();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        Ok(s[1..s.len() - 1].to_string())
    } else {
        Err(ParseError::ExpectedStringLiteral(lit.clone()))
    }
}

fn parse_args_from(parser: &mut Parser) -> Result<Vec<Arg>, ParseError> {
    let mut args = vec![];
    while parser.peek().is_some() {
        match parser.parse_item()? {
            Item::Form(value) => args.push(Arg { name: None, value }),
            Item::Name(name) => {
                if parser.peek().is_none() {
                    return Err(ParseError::MissingValue(name));
                }
                let value = parser.parse()?;
                args.push(Arg {
                    name: Some(name),
                    value,
                });
            }
        }
    }
    Ok(args)
}

fn parse_args(tokens: TokenStream) -> Result<Vec<Arg>, ParseError> {
    let mut parser = Parser::new(tokens.into_iter().collect());
    parse_args_from(&mut parser)
}

fn parse_application(tokens: TokenStream) -> Result<Form, ParseError> {
    let mut parser = Parser::new(tokens.into_iter().collect());
    if parser.peek().is_none() {
        return Ok(Form::Nil);
    }
    let head = parser.parse()?;
    let args = parse_args_from(&mut parser)?;
    Ok(Form::Apply(Box::new(head), args))
}

pub fn parse(tokens: TokenStream) -> Result<Form, ParseError> {
    let mut parser = Parser::new(tokens.into_iter().collect());
    let form = parser.parse()?;
    match parser.peek() {
        None => Ok(form),
        Some(_) => Err(ParseError::TrailingTokens),
    }
}
