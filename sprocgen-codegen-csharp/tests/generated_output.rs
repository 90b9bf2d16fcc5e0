//! End-to-end emission checks: options + probed catalog through the
//! generator and emitter, asserting on the produced C#.

use std::str::FromStr;

use sprocgen_catalog::{
    ColumnDescriptor, ParamDirection, ParameterDescriptor, ProcedureRef, ProcedureSignature,
    ResultSetDescriptor,
};
use sprocgen_codegen::Generator;
use sprocgen_codegen::language::{EmitOptions, Emitter};
use sprocgen_codegen_csharp::CsharpEmitter;
use sprocgen_options::GlobalOptions;

fn generate(options_xml: &str, signatures: &[ProcedureSignature]) -> String {
    let options = GlobalOptions::from_str(options_xml).unwrap();
    let ns = Generator::new(&options, signatures)
        .generate("App.Data")
        .unwrap();
    CsharpEmitter.emit(&ns, &EmitOptions::default())
}

fn param(name: &str, direction: ParamDirection, raw_type: &str, size: i32) -> ParameterDescriptor {
    ParameterDescriptor {
        name: name.to_string(),
        direction,
        raw_type: raw_type.to_string(),
        size,
        nullable: true,
    }
}

fn one_result_set() -> ResultSetDescriptor {
    ResultSetDescriptor {
        columns: vec![ColumnDescriptor {
            name: "Id".to_string(),
            data_type: "int".to_string(),
        }],
    }
}

#[test]
fn test_reader_wrapper_shape() {
    let signatures = vec![ProcedureSignature {
        procedure: ProcedureRef::new("dbo", "GetUsers"),
        parameters: vec![param("@minAge", ParamDirection::Input, "int", -1)],
        result_sets: vec![one_result_set()],
        error: None,
    }];
    let code = generate(
        r#"<Options>
    <RuntimeConnectionString Value="&quot;Server=.;Database=App&quot;" />
    <ClassName Value="Procs" />
</Options>"#,
        &signatures,
    );

    assert!(code.contains("public static SqlDataReader GetUsers(int minAge)"));
    assert!(code.contains("public static SqlDataReader GetUsers(SqlTransaction trs, int minAge)"));
    assert!(code.contains(
        "SqlParameter[] parms = new SqlParameter[] { new SqlParameter(\"@minAge\", minAge) };"
    ));
    assert!(code.contains("return ExecuteDataReader(\"dbo.GetUsers\", parms);"));
    assert!(code.contains("return ExecuteDataReader(trs, \"dbo.GetUsers\", parms);"));
    // the support battery rides along
    assert!(code.contains("public static SqlConnection CreateConnection()"));
    assert!(code.contains("return new SqlConnection(\"Server=.;Database=App\");"));
    assert!(code.contains("cmd.CommandType = CommandType.StoredProcedure;"));
}

#[test]
fn test_output_parameter_marshaling() {
    let signatures = vec![ProcedureSignature {
        procedure: ProcedureRef::new("dbo", "GetStatus"),
        parameters: vec![
            param("@id", ParamDirection::Input, "int", -1),
            param("@status", ParamDirection::Output, "nvarchar", 128),
            param("@count", ParamDirection::Output, "int", -1),
        ],
        result_sets: Vec::new(),
        error: None,
    }];
    let code = generate(
        r#"<Options>
    <RuntimeConnectionString Value="x" />
    <ClassName Value="Procs" />
    <StoredProcedure Name="GetStatus" NullableParams="@count" />
</Options>"#,
        &signatures,
    );

    assert!(code.contains(
        "public static void GetStatus(int id, out string status, out SqlInt32 count)"
    ));
    assert!(code.contains("parms[1].Direction = ParameterDirection.Output;"));
    assert!(code.contains("parms[1].Size = 128;"));
    assert!(code.contains("parms[2].Direction = ParameterDirection.Output;"));
    // int output has no size assignment
    assert!(!code.contains("parms[2].Size"));
    assert!(code.contains("ExecuteNonQuery(\"dbo.GetStatus\", parms);"));
    // plain output copies back through a cast, nullable through the helper
    assert!(code.contains("status = (string)parms[1].Value;"));
    assert!(code.contains("count = Procs.ReadSqlInt32(parms[2]);"));
}

#[test]
fn test_runtime_expression_splices_acquisition() {
    let code = generate(
        r#"<Options>
    <RuntimeConnectionExpression>Config.OpenConnection()</RuntimeConnectionExpression>
    <ClassName Value="Procs" />
</Options>"#,
        &[],
    );
    assert!(!code.contains("CreateConnection"));
    assert!(code.contains("SqlConnection c = Config.OpenConnection();"));
}

#[test]
fn test_typed_null_readers_are_emitted() {
    let code = generate(
        r#"<Options>
    <RuntimeConnectionString Value="x" />
    <ClassName Value="Procs" />
</Options>"#,
        &[],
    );
    assert!(code.contains("public static SqlDateTime ReadSqlDateTime(DataRow row, string c)"));
    assert!(code.contains("public static SqlGuid ReadSqlGuid(SqlParameter p)"));
    assert!(code.contains("if (p.Value == DBNull.Value)"));
    assert!(code.contains("return SqlString.Null;"));
    assert!(code.contains("return rs.GetSqlMoney(rs.GetOrdinal(c));"));
}

#[test]
fn test_warning_annotation_rides_at_column_zero() {
    let signatures = vec![ProcedureSignature {
        procedure: ProcedureRef::new("dbo", "Broken"),
        parameters: Vec::new(),
        result_sets: Vec::new(),
        error: Some("Invalid object name 'missing'.".to_string()),
    }];
    let code = generate(
        r#"<Options>
    <RuntimeConnectionString Value="x" />
    <ClassName Value="Procs" />
</Options>"#,
        &signatures,
    );
    assert!(code.contains("\n#warning Broken: \"Invalid object name 'missing'.\"\n"));
}

#[test]
fn test_mapped_procedures_nest_in_sub_classes() {
    let signatures = vec![ProcedureSignature {
        procedure: ProcedureRef::new("S1", "usp_Orders_Get"),
        parameters: Vec::new(),
        result_sets: vec![one_result_set()],
        error: None,
    }];
    let code = generate(
        r#"<Options>
    <RuntimeConnectionString Value="x" />
    <ClassName Value="Procs" />
    <Map Schema="S1" Prefix="usp_" Class="Orders" />
    <DefaultMapping Prefix="usp_" Delim="_" />
</Options>"#,
        &signatures,
    );
    assert!(code.contains("public class Orders"));
    // the rule won outright: prefix-stripped name, not the default split
    assert!(code.contains("public static SqlDataReader Orders_Get()"));
    assert!(code.contains("return ExecuteDataReader(\"S1.usp_Orders_Get\", parms);"));
}
