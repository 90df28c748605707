//! Kotlin writer for the expression IR.
//!
//! Emits IR as Kotlin source code. The writer owns its buffer; callers only
//! ever see the finished text of a top-level `emit`.

use crate::comments::{CommentConverter, is_line_comment};
use crate::ir::*;
use crate::precedence::{Precedence, Side, needs_parens};
use crate::pretty::{Brackets, join};

/// Kotlin hard keywords that are ordinary identifiers in Java.
const KOTLIN_ONLY_KEYWORDS: &[&str] = &[
    "as", "fun", "in", "is", "object", "typealias", "typeof", "val", "var", "when",
];

/// Where a lambda is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LambdaPosition {
    /// An ordinary operand or argument: `foo({ x })`.
    Inline,
    /// After a call's argument list: `foo(a) { x }`.
    Trailing,
}

/// Emits IR as Kotlin source code.
pub struct KotlinWriter<'c> {
    output: String,
    indent: usize,
    comments: &'c dyn CommentConverter,
}

impl<'c> KotlinWriter<'c> {
    pub fn new(comments: &'c dyn CommentConverter) -> Self {
        Self {
            output: String::new(),
            indent: 0,
            comments,
        }
    }

    /// Emit a single expression to Kotlin source.
    pub fn emit(expr: &Expr, comments: &dyn CommentConverter) -> String {
        let mut writer = KotlinWriter::new(comments);
        writer.write_expr(expr);
        writer.output
    }

    /// Emit every top-level expression of a unit, one per line.
    pub fn emit_unit(unit: &Unit, comments: &dyn CommentConverter) -> String {
        let mut writer = KotlinWriter::new(comments);
        for expr in &unit.expressions {
            writer.write_statement(expr);
            writer.output.push('\n');
        }
        writer.output
    }

    /// Emit a type as it appears in a type argument list.
    pub fn emit_type(ty: &Type) -> String {
        let mut out = String::new();
        write_type(&mut out, ty, true);
        out
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    /// Render through a child writer at the current indentation.
    fn fragment(&self, write: impl FnOnce(&mut KotlinWriter<'c>)) -> String {
        let mut child = KotlinWriter {
            output: String::new(),
            indent: self.indent,
            comments: self.comments,
        };
        write(&mut child);
        child.output
    }

    fn write_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier(ident) => self.write_identifier(ident),

            Expr::Literal(lit) => self.output.push_str(&lit.text),

            Expr::This(label) => self.write_labeled("this", label),

            Expr::Super(label) => self.write_labeled("super", label),

            Expr::Qualified(qualified) => {
                self.write_operand(&qualified.receiver, Precedence::Postfix, Side::Left);
                if qualified.receiver.may_be_absent() {
                    self.output.push_str("?.");
                } else {
                    self.output.push('.');
                }
                self.write_operand(&qualified.selector, Precedence::Postfix, Side::Left);
            }

            Expr::MethodCall(call) => self.write_call(call),

            Expr::Lambda(lambda) => self.write_lambda(lambda, LambdaPosition::Inline),

            Expr::ArrayAccess(access) => {
                self.write_operand(&access.array, Precedence::Postfix, Side::Left);
                if access.array.may_be_absent() && !access.lvalue {
                    self.output.push_str("!!");
                }
                self.output.push('[');
                self.write_expr(&access.index);
                self.output.push(']');
            }

            Expr::Binary(binary) => {
                let precedence = binary.op.precedence();
                self.write_operand(&binary.left, precedence, Side::Left);
                self.output.push(' ');
                self.output.push_str(binary.op.as_str());
                self.output.push(' ');
                self.write_operand(&binary.right, precedence, Side::Right);
            }

            Expr::Prefix(prefix) => {
                let op = prefix.op.as_str();
                let operand = self.fragment(|w| {
                    w.write_operand(&prefix.operand, Precedence::Prefix, Side::Left)
                });
                self.output.push_str(op);
                // `-(-x)` must not lex as `--x`, nor `!(!x)` as `!!x`.
                if op.chars().last() == operand.chars().next() {
                    self.output.push('(');
                    self.output.push_str(&operand);
                    self.output.push(')');
                } else {
                    self.output.push_str(&operand);
                }
            }

            Expr::Postfix(postfix) => {
                self.write_operand(&postfix.operand, Precedence::Postfix, Side::Left);
                self.output.push_str(postfix.op.as_str());
            }

            Expr::NotNullAssertion(assertion) => {
                self.write_operand(&assertion.operand, Precedence::Postfix, Side::Left);
                self.output.push_str("!!");
            }

            Expr::TypeCast(cast) => {
                self.write_operand(&cast.operand, Precedence::TypeRhs, Side::Left);
                self.output.push_str(if cast.safe { " as? " } else { " as " });
                write_type(&mut self.output, &cast.ty, true);
            }

            Expr::IsCheck(check) => {
                self.write_operand(&check.operand, Precedence::NamedCheck, Side::Left);
                self.output
                    .push_str(if check.negated { " !is " } else { " is " });
                write_type(&mut self.output, &check.ty, false);
            }

            Expr::Assignment(assignment) => {
                self.write_expr(&assignment.target);
                self.output.push(' ');
                self.output.push_str(assignment.op.as_str());
                self.output.push(' ');
                self.write_expr(&assignment.value);
            }

            Expr::Elvis(elvis) => {
                self.write_operand(&elvis.left, Precedence::Elvis, Side::Left);
                self.output.push_str(" ?: ");
                self.write_operand(&elvis.right, Precedence::Elvis, Side::Right);
            }

            Expr::Range(range) => {
                self.write_operand(&range.start, Precedence::Range, Side::Left);
                self.output.push_str("..");
                self.write_operand(&range.end, Precedence::Range, Side::Right);
            }

            Expr::If(if_expr) => {
                self.output.push_str("if (");
                self.write_expr(&if_expr.condition);
                self.output.push_str(") ");
                self.write_branch(&if_expr.then_branch);
                self.output.push_str(" else ");
                self.write_branch(&if_expr.else_branch);
            }

            Expr::Parenthesized(paren) => {
                self.output.push('(');
                self.write_expr(&paren.inner);
                self.output.push(')');
            }

            Expr::ClassLiteral(class) => {
                write_type(&mut self.output, &class.ty, false);
                self.output.push_str("::class");
                if class.java {
                    self.output.push_str(".java");
                }
            }

            Expr::Placeholder(placeholder) => self.output.push_str(&placeholder.text),

            Expr::Commented(commented) => self.write_commented(commented, false),
        }
    }

    /// Write a sub-expression used as an operand, grouping it when it binds
    /// less tightly than the enclosing construct.
    fn write_operand(&mut self, operand: &Expr, parent: Precedence, side: Side) {
        if needs_parens(parent, operand.precedence(), side) {
            self.output.push('(');
            self.write_expr(operand);
            self.output.push(')');
        } else {
            self.write_expr(operand);
        }
    }

    fn write_identifier(&mut self, ident: &Identifier) {
        if ident.quoting_needed && needs_backticks(&ident.name) {
            self.output.push('`');
            self.output.push_str(&ident.name);
            self.output.push('`');
        } else {
            self.output.push_str(&ident.name);
        }
    }

    fn write_labeled(&mut self, keyword: &str, label: &Label) {
        self.output.push_str(keyword);
        if let Some(label) = &label.label {
            self.output.push('@');
            self.output.push_str(label);
        }
    }

    fn write_call(&mut self, call: &MethodCall) {
        self.write_operand(&call.target, Precedence::Postfix, Side::Left);

        let type_arguments = call.type_arguments.iter().map(|ty| KotlinWriter::emit_type(ty));
        self.output
            .push_str(&join(type_arguments, ", ", Brackets::OmitWhenEmpty("<", ">")));

        // `foo { x }` rather than `foo() { x }`.
        if !call.arguments.is_empty() || call.trailing_lambda.is_none() {
            let arguments: Vec<String> = call
                .arguments
                .iter()
                .map(|arg| self.fragment(|w| w.write_expr(arg)))
                .collect();
            self.output
                .push_str(&join(&arguments, ", ", Brackets::Always("(", ")")));
        }

        if let Some(lambda) = &call.trailing_lambda {
            self.write_lambda(lambda, LambdaPosition::Trailing);
        }
    }

    fn write_lambda(&mut self, lambda: &Lambda, position: LambdaPosition) {
        if position == LambdaPosition::Trailing {
            self.output.push(' ');
        }

        let parameters = join(
            lambda.parameters.iter().map(|param| {
                let mut out = param.name.clone();
                if let Some(ty) = &param.ty {
                    out.push_str(": ");
                    write_type(&mut out, ty, true);
                }
                out
            }),
            ", ",
            Brackets::None,
        );
        let has_parameters = !lambda.parameters.is_empty();

        match lambda.body.as_slice() {
            [] if has_parameters => {
                self.output.push_str("{ ");
                self.output.push_str(&parameters);
                self.output.push_str(" -> }");
            }
            [] => self.output.push_str("{}"),
            [single] => {
                let body = self.fragment(|w| w.write_expr(single));
                if body.contains('\n') {
                    self.write_lambda_block(&parameters, has_parameters, &lambda.body);
                } else {
                    self.output.push_str("{ ");
                    if has_parameters {
                        self.output.push_str(&parameters);
                        self.output.push_str(" -> ");
                    }
                    self.output.push_str(&body);
                    self.output.push_str(" }");
                }
            }
            body => self.write_lambda_block(&parameters, has_parameters, body),
        }
    }

    fn write_lambda_block(&mut self, parameters: &str, has_parameters: bool, body: &[Expr]) {
        self.output.push('{');
        if has_parameters {
            self.output.push(' ');
            self.output.push_str(parameters);
            self.output.push_str(" ->");
        }
        self.output.push('\n');
        self.indent += 1;
        for expr in body {
            self.write_indent();
            self.write_statement(expr);
            self.output.push('\n');
        }
        self.indent -= 1;
        self.write_indent();
        self.output.push('}');
    }

    /// Write an expression that ends its line, so a trailing `//` comment
    /// may stay a line comment.
    fn write_statement(&mut self, expr: &Expr) {
        match expr {
            Expr::Commented(commented) => self.write_commented(commented, true),
            other => self.write_expr(other),
        }
    }

    /// Write a branch of an `if` expression. A bare `{ ... }` there is a
    /// block, not a lambda value.
    fn write_branch(&mut self, branch: &Expr) {
        if is_lambda(branch) {
            self.output.push('(');
            self.write_expr(branch);
            self.output.push(')');
        } else {
            self.write_expr(branch);
        }
    }

    fn write_commented(&mut self, commented: &Commented, line_end: bool) {
        for raw in &commented.comments.before {
            let text = self.comments.convert(raw);
            if text.is_empty() {
                continue;
            }
            self.output.push_str(&text);
            if is_line_comment(&text) {
                self.output.push('\n');
                self.write_indent();
            } else {
                self.output.push(' ');
            }
        }

        self.write_expr(&commented.expr);

        let after: Vec<String> = commented
            .comments
            .after
            .iter()
            .map(|raw| self.comments.convert(raw))
            .filter(|text| !text.is_empty())
            .collect();
        let last = after.len().saturating_sub(1);
        for (i, text) in after.iter().enumerate() {
            self.output.push(' ');
            // Anything may follow on the same line unless this is the
            // final comment of a line-ending expression.
            if is_line_comment(text) && !(line_end && i == last) {
                self.output.push_str(&line_to_block(text));
            } else {
                self.output.push_str(text);
            }
        }
    }
}

/// `// note` as `/* note */`.
fn line_to_block(text: &str) -> String {
    let body = text.trim_start().trim_start_matches('/').trim();
    if body.is_empty() {
        "/* */".to_string()
    } else {
        format!("/* {} */", body.replace("*/", "* /"))
    }
}

fn is_lambda(expr: &Expr) -> bool {
    match expr {
        Expr::Lambda(_) => true,
        Expr::Commented(commented) => is_lambda(&commented.expr),
        _ => false,
    }
}

/// Write `ty`; `marker` controls whether a nullable type gets its `?`.
fn write_type(out: &mut String, ty: &Type, marker: bool) {
    match ty {
        Type::Class {
            name,
            arguments,
            nullable,
        } => {
            out.push_str(name);
            out.push_str(&join(
                arguments.iter().map(|arg| KotlinWriter::emit_type(arg)),
                ", ",
                Brackets::OmitWhenEmpty("<", ">"),
            ));
            if *nullable && marker {
                out.push('?');
            }
        }
        Type::Primitive {
            primitive,
            nullable,
        } => {
            out.push_str(primitive.name());
            if *nullable && marker {
                out.push('?');
            }
        }
        Type::Array { element, nullable } => {
            match element.as_non_null_primitive() {
                Some(primitive) => {
                    out.push_str(primitive.name());
                    out.push_str("Array");
                }
                None => {
                    out.push_str("Array<");
                    write_type(out, element, true);
                    out.push('>');
                }
            }
            if *nullable && marker {
                out.push('?');
            }
        }
        Type::Star => out.push('*'),
        Type::Projection { variance, bound } => {
            out.push_str(variance.as_str());
            out.push(' ');
            write_type(out, bound, true);
        }
    }
}

/// Java names that are not valid bare Kotlin identifiers.
fn needs_backticks(name: &str) -> bool {
    KOTLIN_ONLY_KEYWORDS.contains(&name) || name.contains('$')
}
