//! Render a [`ContainerRegistration`] as C# source
//!
//! Output is a pure function of the aggregate. Blank-line placement is part
//! of the contract: generated files are compared verbatim.

mod accessor;
mod attributes;
mod setter;
mod writer;

pub use attributes::{attribute_source, attribute_symbols, ATTRIBUTES_HINT_NAME};
pub use writer::{Block, SourceWriter};

use crate::model::{ContainerRegistration, TypeDescriptor, Visible};

/// Build the complete source unit for one accessor
pub fn build(container: &ContainerRegistration) -> String {
    let mut writer = SourceWriter::new();
    writer.line("// <auto-generated/>");
    writer.blank();
    writer.line("#nullable enable");
    writer.blank();

    if container.options.is_thread_safe {
        writer.line("using System.Threading;");
        writer.blank();
    }

    if !container.details.namespace.is_empty() {
        writer.line(format!("namespace {};", container.details.namespace));
        writer.blank();
    }

    write_containing_types(&mut writer, container, &container.details.type_chain);
    writer.finish()
}

fn write_containing_types(
    writer: &mut SourceWriter,
    container: &ContainerRegistration,
    types: &[Visible<TypeDescriptor>],
) {
    match types.split_first() {
        Some((outer, rest)) => {
            let mut scope = writer.block(format!(
                "{} partial {} {}",
                outer.visibility.keyword(),
                outer.item.kind().partial_keyword(),
                outer.item.simple_name()
            ));
            write_containing_types(&mut scope, container, rest);
        }
        None => write_members(writer, container),
    }
}

fn write_members(writer: &mut SourceWriter, container: &ContainerRegistration) {
    if container.has_invalid_accessor() {
        writer.line("// Invalid get method");
        return;
    }

    if container.is_valid() {
        accessor::write_fields(writer, container);
    }

    accessor::write_accessor(writer, container);

    match &container.options.set_method {
        Some(set_method) if container.is_valid() => setter::write_setter(writer, container, set_method),
        _ => {}
    }
}
