use super::writer::SourceWriter;
use crate::config::GeneratorConfig;
use crate::extract::{
    CONTAINER_OPTIONS_ATTRIBUTE, DELEGATE_ATTRIBUTE, REGISTER_ATTRIBUTE, REGISTER_FACTORY_ATTRIBUTE,
};
use crate::host::TypeSymbol;
use crate::model::{Accessibility, TypeKind};

/// Hint name of the attribute definitions unit
pub const ATTRIBUTES_HINT_NAME: &str = "LocusRegistrationAttributes";

const REPEATABLE: &str =
    "[global::System.AttributeUsage(global::System.AttributeTargets.Method, AllowMultiple = true)]";
const SINGLE: &str = "[global::System.AttributeUsage(global::System.AttributeTargets.Method)]";

/// Source declaring the attribute classes users annotate accessors with
pub fn attribute_source(config: &GeneratorConfig) -> String {
    let mut writer = SourceWriter::new();
    writer.line("// <auto-generated />");
    writer.blank();
    writer.line("#nullable enable");
    writer.blank();
    if !config.attribute_namespace.is_empty() {
        writer.line(format!("namespace {};", config.attribute_namespace));
        writer.blank();
    }

    let conditional = format!(
        "[global::System.Diagnostics.Conditional(\"{}\")]",
        config.conditional_symbol
    );

    write_class(&mut writer, &conditional, REPEATABLE, REGISTER_ATTRIBUTE, |body| {
        constructor(
            body,
            REGISTER_ATTRIBUTE,
            "global::System.Type contract, global::System.Type? service = null",
        );
    });
    writer.blank();

    write_class(&mut writer, &conditional, REPEATABLE, REGISTER_FACTORY_ATTRIBUTE, |body| {
        constructor(
            body,
            REGISTER_FACTORY_ATTRIBUTE,
            "global::System.Type serviceType, global::System.String methodName",
        );
    });
    writer.blank();

    write_class(&mut writer, &conditional, SINGLE, CONTAINER_OPTIONS_ATTRIBUTE, |body| {
        body.line("public bool IsThreadSafe { get; set; }");
        body.blank();
        body.line("public string? SetMethod { get; set; }");
    });
    writer.blank();

    write_class(&mut writer, &conditional, REPEATABLE, DELEGATE_ATTRIBUTE, |body| {
        constructor(
            body,
            DELEGATE_ATTRIBUTE,
            "global::System.String member, global::System.Type? containingType = null",
        );
    });

    writer.finish()
}

/// The attribute classes as symbols, so classification can resolve them
/// like any other declared type
pub fn attribute_symbols(config: &GeneratorConfig) -> Vec<TypeSymbol> {
    [
        REGISTER_ATTRIBUTE,
        REGISTER_FACTORY_ATTRIBUTE,
        CONTAINER_OPTIONS_ATTRIBUTE,
        DELEGATE_ATTRIBUTE,
    ]
    .into_iter()
    .map(|name| {
        let mut symbol = TypeSymbol::new(name, config.attribute_namespace.as_str(), TypeKind::Class);
        symbol.accessibility = Accessibility::Internal;
        symbol
    })
    .collect()
}

fn write_class<F>(writer: &mut SourceWriter, conditional: &str, usage: &str, name: &str, members: F)
where
    F: FnOnce(&mut SourceWriter),
{
    writer.line(conditional);
    writer.line(usage);
    let mut body = writer.block(format!(
        "internal sealed class {} : global::System.Attribute",
        name
    ));
    members(&mut *body);
}

fn constructor(writer: &mut SourceWriter, name: &str, params: &str) {
    let _empty = writer.block(format!("public {}({})", name, params));
}
