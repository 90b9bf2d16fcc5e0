//! AST-to-C# rendering.

use sprocgen_codegen::ast::{Class, Expr, Member, Method, Namespace, ParamMode, Stmt, TypeRef};
use sprocgen_codegen::language::{BraceStyle, EmitOptions, Emitter};

use crate::writer::CodeWriter;

const BANNER: &[&str] = &[
    "//------------------------------------------------------------------------------",
    "// <auto-generated>",
    "//     This code was generated by sprocgen.",
    "//     Changes to this file will be lost if the code is regenerated.",
    "// </auto-generated>",
    "//------------------------------------------------------------------------------",
];

/// Renders the wrapper-class tree as C#.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsharpEmitter;

impl Emitter for CsharpEmitter {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn file_extension(&self) -> &'static str {
        "cs"
    }

    fn emit(&self, namespace: &Namespace, options: &EmitOptions) -> String {
        let mut w = CodeWriter::new(options.indent.clone());
        for line in BANNER {
            w.line(line);
        }
        w.blank();

        self.open_block(&mut w, options, &format!("namespace {}", namespace.name));
        for import in &namespace.imports {
            w.line(&format!("using {};", import));
        }
        if !namespace.imports.is_empty() {
            w.blank();
        }
        for class in &namespace.classes {
            self.emit_class(&mut w, options, class);
        }
        self.close_block(&mut w);

        w.finish()
    }
}

impl CsharpEmitter {
    fn open_block(&self, w: &mut CodeWriter, options: &EmitOptions, header: &str) {
        match options.brace_style {
            BraceStyle::NextLine => {
                w.line(header);
                w.line("{");
            }
            BraceStyle::SameLine => {
                w.line(&format!("{} {{", header));
            }
        }
        w.indent();
    }

    fn close_block(&self, w: &mut CodeWriter) {
        w.dedent();
        w.line("}");
    }

    fn emit_class(&self, w: &mut CodeWriter, options: &EmitOptions, class: &Class) {
        self.open_block(w, options, &format!("public class {}", class.name));
        let mut first = true;
        if class.private_ctor {
            first = false;
            self.open_block(w, options, &format!("private {}()", class.name));
            self.close_block(w);
        }
        for member in &class.members {
            if !first && options.blank_lines_between_members {
                w.blank();
            }
            first = false;
            match member {
                Member::Method(method) => self.emit_method(w, options, method),
                Member::Class(nested) => self.emit_class(w, options, nested),
            }
        }
        self.close_block(w);
    }

    fn emit_method(&self, w: &mut CodeWriter, options: &EmitOptions, method: &Method) {
        if let Some(doc) = &method.doc {
            for line in doc.lines() {
                w.line(&format!("/// {}", line));
            }
        }

        let return_type = match &method.return_type {
            Some(ty) => type_name(ty),
            None => "void".to_string(),
        };
        let params = method
            .params
            .iter()
            .map(|p| {
                let marker = match p.mode {
                    ParamMode::In => "",
                    ParamMode::Out => "out ",
                };
                format!("{}{} {}", marker, type_name(&p.ty), p.name)
            })
            .collect::<Vec<_>>()
            .join(", ");

        self.open_block(
            w,
            options,
            &format!("public static {} {}({})", return_type, method.name, params),
        );
        for stmt in &method.body {
            self.emit_stmt(w, options, stmt);
        }
        self.close_block(w);
    }

    fn emit_stmt(&self, w: &mut CodeWriter, options: &EmitOptions, stmt: &Stmt) {
        match stmt {
            Stmt::Local { ty, name, init } => match init {
                Some(init) => {
                    w.line(&format!("{} {} = {};", type_name(ty), name, expr(init)));
                }
                None => {
                    w.line(&format!("{} {};", type_name(ty), name));
                }
            },
            Stmt::Assign { target, value } => {
                w.line(&format!("{} = {};", expr(target), expr(value)));
            }
            Stmt::Expr(e) => {
                w.line(&format!("{};", expr(e)));
            }
            Stmt::Return(value) => match value {
                Some(value) => {
                    w.line(&format!("return {};", expr(value)));
                }
                None => {
                    w.line("return;");
                }
            },
            Stmt::If {
                cond,
                then_body,
                else_body,
            } => {
                self.open_block(w, options, &format!("if ({})", expr(cond)));
                for s in then_body {
                    self.emit_stmt(w, options, s);
                }
                self.close_block(w);
                if !else_body.is_empty() {
                    self.open_block(w, options, "else");
                    for s in else_body {
                        self.emit_stmt(w, options, s);
                    }
                    self.close_block(w);
                }
            }
            Stmt::Snippet(text) => {
                for line in text.lines() {
                    w.raw_line(line);
                }
            }
        }
    }
}

fn type_name(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named(name) => name.clone(),
        TypeRef::Array(inner) => format!("{}[]", type_name(inner)),
    }
}

fn expr(e: &Expr) -> String {
    match e {
        Expr::Str(s) => quote(s),
        Expr::Int(i) => i.to_string(),
        Expr::Name(n) => n.clone(),
        Expr::Raw(r) => r.clone(),
        Expr::StaticMember { ty, member } => format!("{}.{}", ty, member),
        Expr::Property { target, name } => format!("{}.{}", expr(target), name),
        Expr::Index { target, index } => format!("{}[{}]", expr(target), expr(index)),
        Expr::New { ty, args } => format!("new {}({})", type_name(ty), args_list(args)),
        Expr::NewArray { element, items } => {
            if items.is_empty() {
                format!("new {}[0]", type_name(element))
            } else {
                format!("new {}[] {{ {} }}", type_name(element), args_list(items))
            }
        }
        Expr::Call {
            target,
            method,
            args,
        } => match target {
            Some(target) => format!("{}.{}({})", expr(target), method, args_list(args)),
            None => format!("{}({})", method, args_list(args)),
        },
        Expr::Cast { ty, expr: inner } => format!("({}){}", type_name(ty), expr(inner)),
        Expr::Eq { left, right } => format!("{} == {}", expr(left), expr(right)),
    }
}

fn args_list(args: &[Expr]) -> String {
    args.iter().map(expr).collect::<Vec<_>>().join(", ")
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("a\nb"), "\"a\\nb\"");
    }

    #[test]
    fn test_expr_rendering() {
        assert_eq!(
            expr(&Expr::cast(
                TypeRef::named("int"),
                Expr::property(
                    Expr::index(Expr::name("parms"), Expr::int(0)),
                    "Value"
                )
            )),
            "(int)parms[0].Value"
        );
        assert_eq!(
            expr(&Expr::new_array(
                TypeRef::named("SqlParameter"),
                vec![Expr::new_object(
                    TypeRef::named("SqlParameter"),
                    vec![Expr::str("@id"), Expr::name("id")]
                )]
            )),
            "new SqlParameter[] { new SqlParameter(\"@id\", id) }"
        );
        assert_eq!(
            expr(&Expr::new_array(TypeRef::named("SqlParameter"), Vec::new())),
            "new SqlParameter[0]"
        );
        assert_eq!(
            expr(&Expr::eq(
                Expr::property(Expr::name("p"), "Value"),
                Expr::static_member("DBNull", "Value")
            )),
            "p.Value == DBNull.Value"
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&TypeRef::named("byte[]")), "byte[]");
        assert_eq!(
            type_name(&TypeRef::array(TypeRef::named("SqlParameter"))),
            "SqlParameter[]"
        );
    }
}
