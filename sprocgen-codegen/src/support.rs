//! The fixed battery of support methods emitted once per root class:
//! connection/command plumbing, the four execution helpers (plain and
//! transacted), and the typed-null readers for the five nullable wire
//! families in their three forms.

use sprocgen_options::{GlobalOptions, RuntimeConnection};

use crate::ast::{Expr, Member, Method, Stmt, TypeRef};

/// The five readable wire families: helper name, wire type, native type,
/// and the data-reader accessor.
const READERS: &[(&str, &str, &str, &str)] = &[
    ("ReadSqlDateTime", "SqlDateTime", "DateTime", "GetSqlDateTime"),
    ("ReadSqlInt32", "SqlInt32", "int", "GetSqlInt32"),
    ("ReadSqlMoney", "SqlMoney", "decimal", "GetSqlMoney"),
    ("ReadSqlString", "SqlString", "string", "GetSqlString"),
    ("ReadSqlGuid", "SqlGuid", "Guid", "GetSqlGuid"),
];

/// Build the full battery, in stable order.
pub fn support_members(options: &GlobalOptions) -> Vec<Member> {
    let mut members = Vec::new();

    if let RuntimeConnection::ConnectionString(expr) = &options.runtime_connection {
        members.push(Member::Method(create_connection(expr)));
    }

    members.push(Member::Method(execute_data_reader(options, true)));
    members.push(Member::Method(execute_data_reader(options, false)));
    members.push(Member::Method(execute_data_set(options, true)));
    members.push(Member::Method(execute_data_set(options, false)));
    members.push(Member::Method(execute_non_query(options, true)));
    members.push(Member::Method(execute_non_query(options, false)));
    members.push(Member::Method(execute_fill_data_set(options, true)));
    members.push(Member::Method(execute_fill_data_set(options, false)));

    for &(name, wire, native, get_method) in READERS {
        members.push(Member::Method(read_from_data_row(name, wire, native)));
        members.push(Member::Method(read_from_data_reader(name, wire, get_method)));
        members.push(Member::Method(read_from_parameter(name, wire, native)));
    }

    members
}

fn create_connection(connection_expr: &str) -> Method {
    Method::new("CreateConnection")
        .returns(TypeRef::named("SqlConnection"))
        .statement(Stmt::ret(Expr::new_object(
            TypeRef::named("SqlConnection"),
            vec![Expr::raw(connection_expr)],
        )))
}

/// How a plain helper acquires its connection: the emitted helper, or the
/// configured expression spliced in directly.
fn acquire_connection(options: &GlobalOptions) -> Expr {
    match &options.runtime_connection {
        RuntimeConnection::ConnectionString(_) => Expr::call("CreateConnection", Vec::new()),
        RuntimeConnection::Expression(expr) => Expr::raw(expr.clone()),
    }
}

/// The shared prologue of every execution helper: acquire a connection,
/// build the command, attach the parameters.
fn execute_skeleton(name: &str, options: &GlobalOptions, transacted: bool) -> Method {
    let mut method = Method::new(name);
    if transacted {
        method = method.param("Transaction", TypeRef::named("SqlTransaction"));
    }
    method = method
        .param("StoredProcedure", TypeRef::named("string"))
        .param(
            "ProcedureParameters",
            TypeRef::array(TypeRef::named("SqlParameter")),
        );

    let acquire = if transacted {
        Expr::property(Expr::name("Transaction"), "Connection")
    } else {
        acquire_connection(options)
    };
    method = method.statement(Stmt::local(TypeRef::named("SqlConnection"), "c", acquire));
    if !transacted {
        method = method.statement(Stmt::Expr(Expr::call_on(Expr::name("c"), "Open", Vec::new())));
    }
    method = method.statement(Stmt::local(
        TypeRef::named("SqlCommand"),
        "cmd",
        Expr::call_on(Expr::name("c"), "CreateCommand", Vec::new()),
    ));
    if transacted {
        method = method.statement(Stmt::assign(
            Expr::property(Expr::name("cmd"), "Transaction"),
            Expr::name("Transaction"),
        ));
    }
    method
        .statement(Stmt::assign(
            Expr::property(Expr::name("cmd"), "CommandType"),
            Expr::static_member("CommandType", "StoredProcedure"),
        ))
        .statement(Stmt::assign(
            Expr::property(Expr::name("cmd"), "CommandText"),
            Expr::name("StoredProcedure"),
        ))
        .statement(Stmt::Expr(Expr::call_on(
            Expr::property(Expr::name("cmd"), "Parameters"),
            "AddRange",
            vec![Expr::name("ProcedureParameters")],
        )))
}

fn execute_non_query(options: &GlobalOptions, transacted: bool) -> Method {
    execute_skeleton("ExecuteNonQuery", options, transacted).statement(Stmt::Expr(Expr::call_on(
        Expr::name("cmd"),
        "ExecuteNonQuery",
        Vec::new(),
    )))
}

fn execute_data_set(options: &GlobalOptions, transacted: bool) -> Method {
    execute_skeleton("ExecuteDataSet", options, transacted)
        .returns(TypeRef::named("DataSet"))
        .statement(Stmt::local(
            TypeRef::named("DataSet"),
            "ds",
            Expr::new_object(TypeRef::named("DataSet"), Vec::new()),
        ))
        .statement(Stmt::local(
            TypeRef::named("SqlDataAdapter"),
            "a",
            Expr::new_object(TypeRef::named("SqlDataAdapter"), vec![Expr::name("cmd")]),
        ))
        .statement(Stmt::Expr(Expr::call_on(
            Expr::name("a"),
            "Fill",
            vec![Expr::name("ds")],
        )))
        .statement(Stmt::ret(Expr::name("ds")))
}

fn execute_data_reader(options: &GlobalOptions, transacted: bool) -> Method {
    // an owned connection closes with the reader; a borrowed one must not
    let args = if transacted {
        Vec::new()
    } else {
        vec![Expr::static_member("CommandBehavior", "CloseConnection")]
    };
    execute_skeleton("ExecuteDataReader", options, transacted)
        .returns(TypeRef::named("SqlDataReader"))
        .statement(Stmt::ret(Expr::call_on(
            Expr::name("cmd"),
            "ExecuteReader",
            args,
        )))
}

fn execute_fill_data_set(options: &GlobalOptions, transacted: bool) -> Method {
    execute_skeleton("ExecuteFillDataSet", options, transacted)
        .param("ds", TypeRef::named("DataSet"))
        .statement(Stmt::local(
            TypeRef::named("SqlDataAdapter"),
            "a",
            Expr::new_object(TypeRef::named("SqlDataAdapter"), vec![Expr::name("cmd")]),
        ))
        .statement(Stmt::Expr(Expr::call_on(
            Expr::name("a"),
            "Fill",
            vec![Expr::name("ds")],
        )))
}

fn read_from_data_row(name: &str, wire: &str, native: &str) -> Method {
    Method::new(name)
        .param("row", TypeRef::named("DataRow"))
        .param("c", TypeRef::named("string"))
        .returns(TypeRef::named(wire))
        .statement(Stmt::If {
            cond: Expr::call_on(Expr::name("row"), "IsNull", vec![Expr::name("c")]),
            then_body: vec![Stmt::ret(Expr::static_member(wire, "Null"))],
            else_body: vec![Stmt::ret(Expr::new_object(
                TypeRef::named(wire),
                vec![Expr::cast(
                    TypeRef::named(native),
                    Expr::index(Expr::name("row"), Expr::name("c")),
                )],
            ))],
        })
}

fn read_from_data_reader(name: &str, wire: &str, get_method: &str) -> Method {
    Method::new(name)
        .param("rs", TypeRef::named("SqlDataReader"))
        .param("c", TypeRef::named("string"))
        .returns(TypeRef::named(wire))
        .statement(Stmt::ret(Expr::call_on(
            Expr::name("rs"),
            get_method,
            vec![Expr::call_on(
                Expr::name("rs"),
                "GetOrdinal",
                vec![Expr::name("c")],
            )],
        )))
}

fn read_from_parameter(name: &str, wire: &str, native: &str) -> Method {
    Method::new(name)
        .param("p", TypeRef::named("SqlParameter"))
        .returns(TypeRef::named(wire))
        .statement(Stmt::If {
            cond: Expr::eq(
                Expr::property(Expr::name("p"), "Value"),
                Expr::static_member("DBNull", "Value"),
            ),
            then_body: vec![Stmt::ret(Expr::static_member(wire, "Null"))],
            else_body: vec![Stmt::ret(Expr::new_object(
                TypeRef::named(wire),
                vec![Expr::cast(
                    TypeRef::named(native),
                    Expr::property(Expr::name("p"), "Value"),
                )],
            ))],
        })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn options(runtime: &str) -> GlobalOptions {
        let xml = format!(
            r#"<Options>
    {runtime}
    <ClassName Value="Procs" />
</Options>"#
        );
        GlobalOptions::from_str(&xml).unwrap()
    }

    fn method_names(members: &[Member]) -> Vec<&str> {
        members
            .iter()
            .map(|m| match m {
                Member::Method(method) => method.name.as_str(),
                Member::Class(class) => class.name.as_str(),
            })
            .collect()
    }

    #[test]
    fn test_battery_with_connection_string() {
        let o = options(r#"<RuntimeConnectionString Value="&quot;Server=.&quot;" />"#);
        let members = support_members(&o);
        let names = method_names(&members);
        assert_eq!(names[0], "CreateConnection");
        // four helper pairs
        assert_eq!(names.iter().filter(|n| **n == "ExecuteDataReader").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "ExecuteDataSet").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "ExecuteNonQuery").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "ExecuteFillDataSet").count(), 2);
        // five reader families, three forms each
        for reader in ["ReadSqlDateTime", "ReadSqlInt32", "ReadSqlMoney", "ReadSqlString", "ReadSqlGuid"] {
            assert_eq!(names.iter().filter(|n| **n == reader).count(), 3, "{reader}");
        }
        assert_eq!(members.len(), 1 + 8 + 15);
    }

    #[test]
    fn test_expression_suppresses_create_connection() {
        let o = options("<RuntimeConnectionExpression>Config.Open()</RuntimeConnectionExpression>");
        let members = support_members(&o);
        let names = method_names(&members);
        assert!(!names.contains(&"CreateConnection"));
        assert_eq!(members.len(), 8 + 15);

        // the plain helpers splice the expression verbatim
        let reader_plain = members
            .iter()
            .find_map(|m| match m {
                Member::Method(method)
                    if method.name == "ExecuteDataReader" && method.params.len() == 2 =>
                {
                    Some(method)
                }
                _ => None,
            })
            .unwrap();
        assert!(matches!(
            &reader_plain.body[0],
            Stmt::Local { init: Some(Expr::Raw(raw)), .. } if raw == "Config.Open()"
        ));
    }

    #[test]
    fn test_transacted_helpers_reuse_the_transaction_connection() {
        let o = options(r#"<RuntimeConnectionString Value="x" />"#);
        let members = support_members(&o);
        let non_query_transacted = members
            .iter()
            .find_map(|m| match m {
                Member::Method(method)
                    if method.name == "ExecuteNonQuery" && method.params.len() == 3 =>
                {
                    Some(method)
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(non_query_transacted.params[0].name, "Transaction");
        assert!(matches!(
            &non_query_transacted.body[0],
            Stmt::Local { init: Some(Expr::Property { name, .. }), .. } if name == "Connection"
        ));
        // no Open() on a borrowed connection
        assert!(!non_query_transacted.body.iter().any(|s| matches!(
            s,
            Stmt::Expr(Expr::Call { method, .. }) if method == "Open"
        )));
    }
}
