use crate::ast::statements::Stmt;

use super::{
    expr::{gen_call, gen_expression},
    generator::Generator,
};

pub fn gen_statement(generator: &mut Generator, statement: &Stmt) {
    match statement {
        Stmt::VarDec(var_dec) => {
            // The new name is visible to the initializer
            let name = generator.rename(&var_dec.variable.name);
            let initializer = gen_expression(generator, &var_dec.initializer);
            generator.emit(format!("let {} = {};", name, initializer));
        }
        Stmt::Assign(assign) => {
            let target = gen_expression(generator, &assign.target);
            let source = gen_expression(generator, &assign.source);
            generator.emit(format!("{} = {};", target, source));
        }
        Stmt::Print(print) => {
            let argument = gen_expression(generator, &print.argument);
            generator.emit(format!("console.log({});", argument));
        }
        Stmt::Return(ret) => {
            let expression = ret
                .expression
                .as_ref()
                .map(|expression| gen_expression(generator, expression))
                .unwrap_or_default();
            generator.emit(format!("return {};", expression));
        }
        Stmt::Call(call) => {
            let call = gen_call(generator, call);
            generator.emit(format!("{};", call));
        }
        Stmt::FunDec(fun_dec) => {
            let params: Vec<&str> = fun_dec
                .fun
                .params
                .iter()
                .map(|param| param.name.as_str())
                .collect();
            generator.emit(format!(
                "function {}({}) {{",
                fun_dec.fun.name,
                params.join(", ")
            ));
            generator.indented(|generator| gen_body(generator, &fun_dec.body));
            generator.emit(String::from("}"));
        }
        Stmt::While(while_stmt) => {
            let test = gen_expression(generator, &while_stmt.test);
            generator.emit(format!("while ({}) {{", test));
            generator.indented(|generator| gen_body(generator, &while_stmt.body));
            generator.emit(String::from("}"));
        }
    }
}

pub fn gen_body(generator: &mut Generator, body: &[Stmt]) {
    for statement in body {
        gen_statement(generator, statement);
    }
}
