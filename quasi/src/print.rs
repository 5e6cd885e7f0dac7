//! Converting expression trees into text.
//!
//! The output follows the conventions of R's deparser: binary operators are
//! written infix with the minimal parentheses needed to preserve the tree
//! structure, names that are not syntactic are quoted in backticks, and
//! argument names are written as `name = value`. The missing argument prints
//! as nothing, so `` `[`(x, <missing>, 1) `` prints as `x[, 1]`.

use std::io;

use crate::number::{self, Number};
use crate::syntax::{UNQUOTE, UNQUOTE_SPLICE};
use crate::{Argument, Call, Constant, Node};

/// Options for printing expressions.
#[derive(Clone, Debug)]
pub struct Options {
    operator_style: OperatorStyle,
    backticks: bool,
}

impl Options {
    /// Set the style used for calls to operators.
    pub fn with_operator_style(mut self, style: OperatorStyle) -> Self {
        self.operator_style = style;
        self
    }

    /// Set whether names that are not syntactic are quoted in backticks.
    pub fn with_backticks(mut self, backticks: bool) -> Self {
        self.backticks = backticks;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            operator_style: OperatorStyle::Infix,
            backticks: true,
        }
    }
}

/// How to print calls to operators and other syntactic forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorStyle {
    /// Use the surface syntax, e.g. `a + b`, `x[1]` or `if (c) a else b`.
    Infix,
    /// Print every call in function-call notation, e.g. `` `+`(a, b) ``.
    Prefix,
}

/// Represents a character escape code in a type-safe manner.
pub enum CharEscape {
    /// An escaped quote `"`
    Quote,
    /// An escaped reverse solidus `\`
    ReverseSolidus,
    /// Alert, also known as "bell" (escaped as `\a`)
    Alert,
    /// An escaped backspace character (escaped as `\b`)
    Backspace,
    /// An escaped form feed character (escaped as `\f`)
    FormFeed,
    /// An escaped line feed character (escaped as `\n`)
    LineFeed,
    /// An escaped carriage return character (escaped as `\r`)
    CarriageReturn,
    /// An escaped tab character (escaped as `\t`)
    Tab,
    /// An escaped vertical tab character (escaped as `\v`)
    VerticalTab,
    /// Any other ASCII control character (escaped as `\xXX`)
    AsciiControl(u8),
}

impl CharEscape {
    #[inline]
    fn from_escape_table(escape: u8, byte: u8) -> CharEscape {
        match escape {
            self::AA => CharEscape::Alert,
            self::BB => CharEscape::Backspace,
            self::FF => CharEscape::FormFeed,
            self::TT => CharEscape::Tab,
            self::NN => CharEscape::LineFeed,
            self::RR => CharEscape::CarriageReturn,
            self::VV => CharEscape::VerticalTab,
            self::QU => CharEscape::Quote,
            self::BS => CharEscape::ReverseSolidus,
            _ => CharEscape::AsciiControl(byte),
        }
    }
}

/// This trait abstracts away writing the pieces of an expression, which
/// allows the implementer to customize the textual representation.
///
/// The default implementation produces R syntax.
pub trait Formatter {
    /// The style used for calls to operators.
    #[inline]
    fn operator_style(&self) -> OperatorStyle {
        OperatorStyle::Infix
    }

    /// Writes the null constant.
    #[inline]
    fn write_null<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"NULL")
    }

    /// Writes a boolean constant as `TRUE` or `FALSE`.
    #[inline]
    fn write_bool<W: ?Sized>(&mut self, writer: &mut W, value: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(if value { b"TRUE" } else { b"FALSE" })
    }

    /// Writes a number like `-123` or `0.5`.
    ///
    /// Floats with an integral value are written without a fractional part,
    /// as R does.
    #[inline]
    fn write_number<W: ?Sized>(&mut self, writer: &mut W, value: &Number) -> io::Result<()>
    where
        W: io::Write,
    {
        struct Write<'a, W: io::Write + ?Sized> {
            writer: &'a mut W,
        }
        impl<'a, W: io::Write + ?Sized> number::Visitor for Write<'a, W> {
            type Value = ();
            type Error = io::Error;

            fn visit_i64(self, n: i64) -> io::Result<()> {
                let mut buffer = itoa::Buffer::new();
                self.writer.write_all(buffer.format(n).as_bytes())
            }
            fn visit_f64(self, n: f64) -> io::Result<()> {
                let mut buffer = ryu::Buffer::new();
                let s = buffer.format(n);
                self.writer
                    .write_all(s.strip_suffix(".0").unwrap_or(s).as_bytes())
            }
        }
        value.visit(Write { writer })
    }

    /// Called before each series of `write_string_fragment` and
    /// `write_char_escape`.  Writes a `"` to the specified writer.
    #[inline]
    fn begin_string<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"\"")
    }

    /// Called after each series of `write_string_fragment` and
    /// `write_char_escape`.  Writes a `"` to the specified writer.
    #[inline]
    fn end_string<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"\"")
    }

    /// Writes a string fragment that doesn't need any escaping.
    #[inline]
    fn write_string_fragment<W: ?Sized>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(fragment.as_bytes())
    }

    /// Writes a character escape code.
    #[inline]
    fn write_char_escape<W: ?Sized>(
        &mut self,
        writer: &mut W,
        char_escape: CharEscape,
    ) -> io::Result<()>
    where
        W: io::Write,
    {
        write_r_char_escape(writer, char_escape)
    }

    /// Writes a name, quoting it in backticks unless it is syntactic.
    #[inline]
    fn write_symbol<W: ?Sized>(&mut self, writer: &mut W, name: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        write_quoted_name(writer, name)
    }

    /// Writes the missing argument. The default writes nothing.
    #[inline]
    fn write_missing<W: ?Sized>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        Ok(())
    }

    /// Called before the arguments of a call.  Writes a `(`.
    #[inline]
    fn begin_args<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"(")
    }

    /// Called after the arguments of a call.  Writes a `)`.
    #[inline]
    fn end_args<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b")")
    }

    /// Called before each argument. Writes a `, ` unless it is the first.
    #[inline]
    fn begin_arg<W: ?Sized>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    /// Writes the name of an argument, followed by ` = `.
    #[inline]
    fn write_arg_name<W: ?Sized>(&mut self, writer: &mut W, name: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        self.write_symbol(writer, name)?;
        writer.write_all(b" = ")
    }

    /// Writes an infix or prefix operator.
    #[inline]
    fn write_operator<W: ?Sized>(&mut self, writer: &mut W, op: &str, spaced: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        if spaced {
            writer.write_all(b" ")?;
            writer.write_all(op.as_bytes())?;
            writer.write_all(b" ")
        } else {
            writer.write_all(op.as_bytes())
        }
    }

    /// Writes an opening parenthesis for grouping.
    #[inline]
    fn begin_group<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"(")
    }

    /// Writes a closing parenthesis for grouping.
    #[inline]
    fn end_group<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b")")
    }
}

/// This structure prints expressions on a single line, using the default
/// representation.
#[derive(Clone, Debug)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {}

/// A formatter which can be tuned with [`Options`].
#[derive(Clone, Debug)]
pub struct CustomizedFormatter {
    options: Options,
}

impl Formatter for CustomizedFormatter {
    fn operator_style(&self) -> OperatorStyle {
        self.options.operator_style
    }

    fn write_symbol<W: ?Sized>(&mut self, writer: &mut W, name: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        if self.options.backticks {
            write_quoted_name(writer, name)
        } else {
            writer.write_all(name.as_bytes())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
    None,
}

#[derive(Debug, Clone, Copy)]
struct Binary {
    prec: u8,
    assoc: Assoc,
    spaced: bool,
}

const UNARY_MINUS_PREC: u8 = 12;

fn binary_operator(name: &str) -> Option<Binary> {
    let (prec, assoc, spaced) = match name {
        "<-" | "<<-" | ":=" | "=" => (2, Assoc::Right, true),
        "~" => (3, Assoc::Left, true),
        "||" | "|" => (4, Assoc::Left, true),
        "&&" | "&" => (5, Assoc::Left, true),
        "==" | "!=" | "<" | "<=" | ">" | ">=" => (7, Assoc::None, true),
        "+" | "-" => (8, Assoc::Left, true),
        "*" | "/" => (9, Assoc::Left, true),
        "|>" => (10, Assoc::Left, true),
        ":" => (11, Assoc::Left, false),
        "^" => (13, Assoc::Right, false),
        "$" | "@" => (14, Assoc::Left, false),
        _ if name.len() >= 2 && name.starts_with('%') && name.ends_with('%') => {
            (10, Assoc::Left, true)
        }
        _ => return None,
    };
    Some(Binary {
        prec,
        assoc,
        spaced,
    })
}

fn unary_operator(name: &str) -> Option<u8> {
    match name {
        "-" | "+" => Some(UNARY_MINUS_PREC),
        "!" => Some(6),
        UNQUOTE | UNQUOTE_SPLICE => Some(6),
        "~" => Some(3),
        _ => None,
    }
}

/// The shape a call is printed in.
enum Form<'a> {
    Binary(&'a str, Binary, &'a Node, &'a Node),
    Unary(&'a str, u8, &'a Node),
    Paren(&'a Node),
    Brace(&'a [Argument]),
    If(&'a Node, &'a Node, Option<&'a Node>),
    Function(&'a Node, &'a Node),
    Index(&'a str, &'a Node, &'a [Argument]),
    Prefix,
}

impl<'a> Form<'a> {
    fn of(call: &'a Call, style: OperatorStyle) -> Form<'a> {
        let name = match (style, call.head_name()) {
            (OperatorStyle::Infix, Some(name)) => name,
            _ => return Form::Prefix,
        };
        let args = call.args();
        let plain = args.iter().all(|arg| arg.name().is_none() && !arg.value().is_missing());
        match (name, args) {
            ("(", [inner]) if plain => Form::Paren(inner.value()),
            ("{", _) if plain => Form::Brace(args),
            ("if", [cond, then]) if plain => Form::If(cond.value(), then.value(), None),
            ("if", [cond, then, alt]) if plain => {
                Form::If(cond.value(), then.value(), Some(alt.value()))
            }
            ("function", [formals, body, ..])
                if formals.value().as_pairlist().is_some() && args.len() <= 3 =>
            {
                Form::Function(formals.value(), body.value())
            }
            ("[" | "[[", [object, rest @ ..])
                if object.name().is_none() && !object.value().is_missing() =>
            {
                Form::Index(name, object.value(), rest)
            }
            (_, [lhs, rhs]) if plain => match binary_operator(name) {
                Some(op) => Form::Binary(name, op, lhs.value(), rhs.value()),
                None => Form::Prefix,
            },
            (_, [operand]) if plain => match unary_operator(name) {
                Some(prec) => Form::Unary(name, prec, operand.value()),
                None => Form::Prefix,
            },
            _ => Form::Prefix,
        }
    }

    fn precedence(&self) -> Option<u8> {
        match self {
            Form::Binary(_, op, _, _) => Some(op.prec),
            Form::Unary(_, prec, _) => Some(*prec),
            // `function` and `if` extend as far to the right as possible.
            Form::If(..) | Form::Function(..) => Some(1),
            Form::Paren(_) | Form::Brace(_) | Form::Index(..) | Form::Prefix => None,
        }
    }
}

/// A printer for expression trees.
#[derive(Debug)]
pub struct Printer<W, F = DefaultFormatter> {
    writer: W,
    formatter: F,
}

impl<W> Printer<W, CustomizedFormatter>
where
    W: io::Write,
{
    /// Construct a printer tuned with the specified options.
    pub fn with_options(writer: W, options: Options) -> Self {
        Printer {
            writer,
            formatter: CustomizedFormatter { options },
        }
    }
}

impl<W> Printer<W>
where
    W: io::Write,
{
    /// Creates a new printer using the default representation.
    #[inline]
    pub fn new(writer: W) -> Self {
        Printer::with_formatter(writer, DefaultFormatter)
    }
}

impl<W, F> Printer<W, F>
where
    W: io::Write,
    F: Formatter,
{
    /// Creates a new printer whose output will be written to the writer
    /// specified.
    #[inline]
    pub fn with_formatter(writer: W, formatter: F) -> Self {
        Printer { writer, formatter }
    }

    /// Unwrap the `Writer` from the `Printer`.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Output the representation of the specified node to the underlying
    /// writer.
    pub fn print(&mut self, node: &Node) -> io::Result<()> {
        match node {
            Node::Constant(c) => self.print_constant(c),
            Node::Symbol(sym) if sym.is_missing() => self.formatter.write_missing(&mut self.writer),
            Node::Symbol(sym) => self.formatter.write_symbol(&mut self.writer, sym.name()),
            Node::Call(call) => self.print_call(call),
            Node::Pairlist(list) => {
                self.writer.write_all(b"pairlist")?;
                self.print_args(list.args())
            }
        }
    }

    fn print_constant(&mut self, c: &Constant) -> io::Result<()> {
        match c {
            Constant::Null => self.formatter.write_null(&mut self.writer),
            Constant::Bool(b) => self.formatter.write_bool(&mut self.writer, *b),
            Constant::Number(n) => self.formatter.write_number(&mut self.writer, n),
            Constant::String(s) => format_escaped_str(&mut self.writer, &mut self.formatter, s),
        }
    }

    fn print_call(&mut self, call: &Call) -> io::Result<()> {
        match Form::of(call, self.formatter.operator_style()) {
            Form::Binary(name, op, lhs, rhs) => {
                let lhs_parens = self.needs_parens(lhs, op, Assoc::Left);
                self.print_grouped(lhs, lhs_parens)?;
                self.formatter.write_operator(&mut self.writer, name, op.spaced)?;
                let rhs_parens = self.needs_parens(rhs, op, Assoc::Right);
                self.print_grouped(rhs, rhs_parens)
            }
            Form::Unary(name, prec, operand) => {
                self.formatter.write_operator(&mut self.writer, name, false)?;
                let parens = self.precedence(operand).map_or(false, |p| p < prec);
                self.print_grouped(operand, parens)
            }
            Form::Paren(inner) => self.print_grouped(inner, true),
            Form::Brace(body) => {
                if body.is_empty() {
                    return self.writer.write_all(b"{}");
                }
                self.writer.write_all(b"{ ")?;
                for (i, arg) in body.iter().enumerate() {
                    if i > 0 {
                        self.writer.write_all(b"; ")?;
                    }
                    self.print(arg.value())?;
                }
                self.writer.write_all(b" }")
            }
            Form::If(cond, then, alt) => {
                self.writer.write_all(b"if (")?;
                self.print(cond)?;
                self.writer.write_all(b") ")?;
                self.print(then)?;
                if let Some(alt) = alt {
                    self.writer.write_all(b" else ")?;
                    self.print(alt)?;
                }
                Ok(())
            }
            Form::Function(formals, body) => {
                self.writer.write_all(b"function")?;
                if let Some(formals) = formals.as_pairlist() {
                    self.print_formals(formals.args())?;
                }
                self.writer.write_all(b" ")?;
                self.print(body)
            }
            Form::Index(name, object, rest) => {
                let parens = self.precedence(object).is_some();
                self.print_grouped(object, parens)?;
                let (open, close): (&[u8], &[u8]) = if name == "[" {
                    (b"[", b"]")
                } else {
                    (b"[[", b"]]")
                };
                self.writer.write_all(open)?;
                self.print_arg_list(rest)?;
                self.writer.write_all(close)
            }
            Form::Prefix => {
                let head = call.head();
                let parens = self.precedence(head).is_some();
                self.print_grouped(head, parens)?;
                self.print_args(call.args())
            }
        }
    }

    fn print_grouped(&mut self, node: &Node, parens: bool) -> io::Result<()> {
        if parens {
            self.formatter.begin_group(&mut self.writer)?;
            self.print(node)?;
            self.formatter.end_group(&mut self.writer)
        } else {
            self.print(node)
        }
    }

    fn print_args(&mut self, args: &[Argument]) -> io::Result<()> {
        self.formatter.begin_args(&mut self.writer)?;
        self.print_arg_list(args)?;
        self.formatter.end_args(&mut self.writer)
    }

    fn print_arg_list(&mut self, args: &[Argument]) -> io::Result<()> {
        for (i, arg) in args.iter().enumerate() {
            self.formatter.begin_arg(&mut self.writer, i == 0)?;
            if let Some(name) = arg.name() {
                self.formatter.write_arg_name(&mut self.writer, name)?;
            }
            self.print(arg.value())?;
        }
        Ok(())
    }

    fn print_formals(&mut self, formals: &[Argument]) -> io::Result<()> {
        self.formatter.begin_args(&mut self.writer)?;
        for (i, formal) in formals.iter().enumerate() {
            self.formatter.begin_arg(&mut self.writer, i == 0)?;
            match (formal.name(), formal.value()) {
                (Some(name), value) if value.is_missing() => {
                    self.formatter.write_symbol(&mut self.writer, name)?
                }
                (Some(name), value) => {
                    self.formatter.write_arg_name(&mut self.writer, name)?;
                    self.print(value)?;
                }
                (None, value) => self.print(value)?,
            }
        }
        self.formatter.end_args(&mut self.writer)
    }

    /// The precedence of `node` when printed, or `None` if it never needs
    /// parentheses.
    fn precedence(&self, node: &Node) -> Option<u8> {
        match node {
            Node::Call(call) => Form::of(call, self.formatter.operator_style()).precedence(),
            Node::Constant(Constant::Number(n)) if n.as_f64() < 0.0 => Some(UNARY_MINUS_PREC),
            _ => None,
        }
    }

    fn needs_parens(&self, operand: &Node, op: Binary, side: Assoc) -> bool {
        match self.precedence(operand) {
            None => false,
            Some(prec) => prec < op.prec || (prec == op.prec && op.assoc != side),
        }
    }
}

impl<W, F> io::Write for Printer<W, F>
where
    W: io::Write,
{
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Returns true if `name` can be written without backticks.
pub fn is_syntactic_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "if", "else", "repeat", "while", "function", "for", "next", "break", "TRUE", "FALSE",
        "NULL", "Inf", "NaN", "NA", "in",
    ];
    if name == "..." {
        return true;
    }
    if let Some(index) = name.strip_prefix("..") {
        if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
    }
    let mut chars = name.chars();
    match chars.next() {
        Some('.') if name[1..].starts_with(|c: char| c.is_ascii_digit()) => return false,
        Some(c) if c.is_alphabetic() || c == '.' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '.' || c == '_') && !RESERVED.contains(&name)
}

/// Formats a name the way it is printed as a symbol or argument name.
pub(crate) fn format_name(name: &str) -> String {
    let mut buf = Vec::with_capacity(name.len() + 2);
    match write_quoted_name(&mut buf, name) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| name.to_owned()),
        Err(_) => name.to_owned(),
    }
}

fn write_quoted_name<W: ?Sized>(writer: &mut W, name: &str) -> io::Result<()>
where
    W: io::Write,
{
    if is_syntactic_name(name) {
        return writer.write_all(name.as_bytes());
    }
    writer.write_all(b"`")?;
    for (i, part) in name.split('`').enumerate() {
        if i > 0 {
            writer.write_all(b"\\`")?;
        }
        writer.write_all(part.as_bytes())?;
    }
    writer.write_all(b"`")
}

fn format_escaped_str<W: ?Sized, F: ?Sized>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
) -> io::Result<()>
where
    W: io::Write,
    F: Formatter,
{
    formatter.begin_string(writer)?;
    let bytes = value.as_bytes();
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let escape = ESCAPE[byte as usize];
        if escape == 0 {
            continue;
        }
        if start < i {
            formatter.write_string_fragment(writer, &value[start..i])?;
        }
        formatter.write_char_escape(writer, CharEscape::from_escape_table(escape, byte))?;
        start = i + 1;
    }
    if start != bytes.len() {
        formatter.write_string_fragment(writer, &value[start..])?;
    }
    formatter.end_string(writer)
}

fn write_r_char_escape<W: ?Sized>(writer: &mut W, char_escape: CharEscape) -> io::Result<()>
where
    W: io::Write,
{
    use self::CharEscape::*;

    let s = match char_escape {
        Quote => b"\\\"",
        ReverseSolidus => b"\\\\",
        Alert => b"\\a",
        Backspace => b"\\b",
        FormFeed => b"\\f",
        LineFeed => b"\\n",
        CarriageReturn => b"\\r",
        Tab => b"\\t",
        VerticalTab => b"\\v",
        AsciiControl(byte) => {
            static HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";
            let bytes = &[
                b'\\',
                b'x',
                HEX_DIGITS[(byte >> 4) as usize],
                HEX_DIGITS[(byte & 0xF) as usize],
            ];
            return writer.write_all(bytes);
        }
    };

    writer.write_all(s)
}

const AA: u8 = b'a'; // \x07
const BB: u8 = b'b'; // \x08
const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const VV: u8 = b'v'; // \x0B
const FF: u8 = b'f'; // \x0C
const RR: u8 = b'r'; // \x0D
const QU: u8 = b'"'; // \x22
const BS: u8 = b'\\'; // \x5C
const UU: u8 = b'u'; // \x00...\x1F except the ones above
const __: u8 = 0;

// Lookup table of escape sequences. A value of b'x' at index i means that byte
// i is escaped as "\x". A value of 0 means that byte i is not escaped.
static ESCAPE: [u8; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    UU, UU, UU, UU, UU, UU, UU, AA, BB, TT, NN, VV, FF, RR, UU, UU, // 0
    UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, // 1
    __, __, QU, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, UU, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

/// Print the given node as text into the IO stream, using the default
/// printer options.
#[inline]
pub fn to_writer<W: io::Write>(writer: W, node: &Node) -> io::Result<()> {
    let mut printer = Printer::new(writer);
    printer.print(node)
}

/// Print the given node as text into the IO stream.
#[inline]
pub fn to_writer_custom<W: io::Write>(writer: W, node: &Node, options: Options) -> io::Result<()> {
    let mut printer = Printer::with_options(writer, options);
    printer.print(node)
}

/// Print the given node as a string, using the default printer options.
///
/// ```
/// # use quasi::{print, Argument, Node};
/// let node = Node::call(Node::symbol("foo")?, vec![Argument::named("x", 10)])?;
/// assert_eq!(print::to_string(&node).unwrap(), "foo(x = 10)");
/// # Ok::<(), quasi::Error>(())
/// ```
#[inline]
pub fn to_string(node: &Node) -> io::Result<String> {
    let mut writer = Vec::with_capacity(128);
    to_writer(&mut writer, node)?;
    String::from_utf8(writer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Print the given node as a string.
#[inline]
pub fn to_string_custom(node: &Node, options: Options) -> io::Result<String> {
    let mut writer = Vec::with_capacity(128);
    to_writer_custom(&mut writer, node, options)?;
    String::from_utf8(writer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests;
