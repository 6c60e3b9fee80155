use crate::ast::expressions::{Call, Expr, Literal, UnaryOp};

use super::generator::Generator;

pub fn gen_expression(generator: &Generator, expression: &Expr) -> String {
    match expression {
        Expr::Literal(literal) => gen_literal(literal),
        Expr::Variable(variable) => generator.resolve(&variable.name).to_string(),
        Expr::Binary(binary) => format!(
            "{} {} {}",
            gen_expression(generator, &binary.left),
            binary.op.as_str(),
            gen_expression(generator, &binary.right)
        ),
        Expr::Unary(unary) => {
            let operand = gen_expression(generator, &unary.operand);
            match (unary.op, unary.operand.as_ref()) {
                (UnaryOp::Negate, Expr::Unary(_)) => format!("- {}", operand),
                (UnaryOp::Negate, Expr::Binary(_)) => format!("-({})", operand),
                (op, _) => format!("{}{}", op.as_str(), operand),
            }
        }
        Expr::Array(array) => {
            let elements: Vec<String> = array
                .elements
                .iter()
                .map(|element| gen_expression(generator, element))
                .collect();
            format!("[{}]", elements.join(", "))
        }
        Expr::Subscript(subscript) => format!(
            "{}[{}]",
            gen_expression(generator, &subscript.array),
            gen_expression(generator, &subscript.index)
        ),
        Expr::Call(call) => gen_call(generator, call),
    }
}

pub fn gen_call(generator: &Generator, call: &Call) -> String {
    let args: Vec<String> = call
        .args
        .iter()
        .map(|arg| gen_expression(generator, arg))
        .collect();
    format!("{}({})", call.name, args.join(", "))
}

pub fn gen_literal(literal: &Literal) -> String {
    match literal {
        Literal::Number(value) => format_number(*value),
        Literal::BigInt(value) => format!("{}n", value),
        Literal::Str(value) => serde_json::Value::String(value.clone()).to_string(),
        Literal::Bool(value) => value.to_string(),
        Literal::Null => String::from("null"),
        Literal::Undefined => String::from("undefined"),
    }
}

/// Formats `value` the way JavaScript's `Number.prototype.toString` does:
/// shortest round-trip digits, plain notation for decimal exponents in
/// `-6..21`, `1e+21` style otherwise.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return String::from("0");
    }

    let sign = if value < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest digits that round-trip, e.g. `1.5e-7`
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exponent_sign = if n - 1 >= 0 { "+" } else { "-" };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, exponent_sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", first, rest, exponent_sign, (n - 1).abs())
        }
    };

    format!("{}{}", sign, body)
}
