//! Documentation content for the wq CLI

use super::CliError;
use crate::builtins::BUILTINS;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Control,
    Literals,
    Builtins,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "control" | "control_flow" | "flow" => Some(Self::Control),
            "literals" | "literal" | "values" => Some(Self::Literals),
            "builtins" | "builtin" => Some(Self::Builtins),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"WQ DOCUMENTATION

wq is a terse array language in the APL/K family. Programs are sequences of
expressions separated by newlines or semicolons. Functions are applied by
juxtaposition (`f x`) or with brackets (`f[x; y]`).

DOCUMENTATION CATEGORIES

  syntax            Statements, assignment, juxtaposition, lists and dicts
  operators         Operator table and precedence
  control           Conditionals, loops and control words
  literals          Numbers, characters, strings, symbols and constants
  builtins          Reserved builtin names

QUICK REFERENCE

  x: 1 + 2          Assignment
  f x               Apply f to x
  f[x; y]           Apply or index with several arguments
  {[a; b] a + b}    Function with parameters
  (1; 2; 3)         List
  (`a: 1; `b: 2)    Dict
  $[c; t; e]        Conditional
  W[c; body]        While loop
  x | f | g         Pipe

Run 'wq doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<String, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC.to_string()),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC.to_string()),
        Some(DocCategory::Control) => Ok(CONTROL_DOC.to_string()),
        Some(DocCategory::Literals) => Ok(LITERALS_DOC.to_string()),
        Some(DocCategory::Builtins) => Ok(builtins_doc()),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

fn builtins_doc() -> String {
    let mut doc = String::from(
        "BUILTINS - Reserved Names\n\n\
         These names are reserved. They parse like any other variable but\n\
         cannot be used as function parameters.\n\n",
    );
    for row in BUILTINS.chunks(6) {
        let cells: Vec<String> = row.iter().map(|name| format!("{:<10}", name)).collect();
        doc.push_str("  ");
        doc.push_str(cells.concat().trim_end());
        doc.push('\n');
    }
    doc
}

const SYNTAX_DOC: &str = r#"SYNTAX - Statements and Expressions

STATEMENTS
  Statements are separated by newlines or semicolons. Blank lines and
  comment lines (starting with //) are ignored.

    x: 1; y: 2
    z: x + y      // trailing comment

ASSIGNMENT
  name: expression
    Binds a value. Assignment is right-associative and loosest of all.

    a: b: 0

  Indexed targets are allowed:

    m[1]: 10

APPLICATION
  f x
    Juxtaposition applies f to x. Chains associate left: `f x y` is
    `(f x) y`. The argument binds tighter than any binary operator, so
    `f x + 1` is `(f x) + 1`.

  f[x; y]
    Bracket application or indexing. The `[` must touch the previous
    token; `f [x]` is a syntax error.

  f x[1]          Index belongs to the argument: f (x[1])
  f -x            Minus followed by a space is subtraction: f - x
  f (-x)          Parenthesize to pass a negated argument

FUNCTIONS
  {body}
  {[a; b] body}
    Parameters are separated by semicolons. A body may contain several
    statements; the last one is the result.

    add: {[a; b] a + b}
    sq: {[x] x * x}

PARENTHESES
  ()              Empty list
  (x)             Grouping
  (1; 2; 3)       List
  (`a: 1; `b: 2)  Dict with symbol keys

  Items may be separated by semicolons or newlines, and a trailing
  separator before the closing parenthesis is allowed.

PIPE
  x | f | g
    Passes each stage's result to the next stage.

MAGIC COMMANDS
  !command text
    A line starting with ! at the top level is handed to the host
    verbatim.

SHEBANG
  #!/usr/bin/env wq
    Allowed on the first line only.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Precedence, Loosest to Tightest

  :           Assignment (right-associative)
  |           Pipe
  ,           Join
  = ~ != < <= > >=
              Comparison
  + -         Additive
  * / /. % %. Multiplicative
  - #         Unary prefix (negate, count)
  ^           Power (right-associative)
  f x  f[x]   Application and indexing

ARITHMETIC
  +     Add
  -     Subtract
  *     Multiply
  /     Divide
  /.    Integer divide
  %     Modulo
  %.    Float modulo
  ^     Power

  Examples:
    1 + 2 * 3       7
    -2^2            -(2^2)
    2^3^2           2^(3^2)
    2^-1            Exponent may carry a sign

COMPARISON
  =     Equal
  ~     Not equal
  !=    Not equal (same as ~)
  <  <=  >  >=

UNARY
  -x    Negate
  #x    Count

  Prefixes stack: `-#x`, `--x`.

JOIN
  1, 2, 3
    Commas build a flat join of all elements.
"#;

const CONTROL_DOC: &str = r#"CONTROL - Conditionals, Loops and Control Words

CONDITIONAL
  $[cond; then; else]
    Two-arm conditional. Inside the `then` arm statements are separated
    by newlines; the first semicolon ends the arm. Without a semicolon,
    the last line before `]` is the `else` arm.

    $[x > 0; `pos; `neg]

    $[x > 0
      `pos
      `neg]

  $.[cond; body]
    One-arm conditional. The body may hold several statements separated
    by semicolons or newlines.

WHILE
  W[cond; body]
    Repeats body while cond holds.

    W[i < 10; i: i + 1]

FOR
  N[count; body]
    Repeats body count times.

  W and N are ordinary names unless immediately followed by `[`.

CONTROL WORDS
  @r value    Return from the enclosing function (value optional)
  @b          Break out of the enclosing loop
  @c          Continue with the next iteration
  @a expr     Assert expr holds
  @t expr     Try: evaluate expr, capturing failure
"#;

const LITERALS_DOC: &str = r#"LITERALS - Values Written in Source

NUMBERS
  42          Integer (64-bit)
  3.14        Float
  1.0         Floats need digits on both sides of the dot

CHARACTERS AND STRINGS
  'a'         Character
  "hello"     String

  Escapes:
    \n  \t  \r  \0  \\  \'  \"
    Any other escaped character stands for itself.

SYMBOLS
  `name
    A backtick followed directly by a name.

CONSTANTS
  true false  Booleans
  inf         Infinity
  nan         Not a number

  Only lowercase spellings are constants. `Inf` or `NaN` parse as plain
  names and draw a warning.
"#;
