use super::writer::SourceWriter;
use crate::model::{ContainerRegistration, SetMethodInfo, Visible};

/// Companion setter storing a caller-provided instance in the matching field
pub(super) fn write_setter(writer: &mut SourceWriter, container: &ContainerRegistration, setter: &Visible<SetMethodInfo>) {
    let info = &setter.item;
    let g = &info.generic_param;
    let thread_safe = container.options.is_thread_safe;

    writer.blank();
    let mut body = writer.block(format!(
        "{} partial {} {}<{}>({}? feature)",
        setter.visibility.keyword(),
        if info.is_returnable { "bool" } else { "void" },
        info.name,
        g,
        g
    ));

    let fallthrough = if info.is_returnable {
        "return false;"
    } else {
        "throw new global::System.NotSupportedException();"
    };

    if container.registrations.is_empty() {
        body.line(fallthrough);
        return;
    }

    for (i, registration) in container.registrations.iter().enumerate() {
        let service = registration.service_type();
        let field = registration.variable_name();
        let keyword = if i == 0 { "if" } else { "else if" };

        let mut branch = body.block(format!("{} (typeof({}) == typeof({}))", keyword, g, service.full_name()));
        let boxing = if service.kind().needs_boxing() { "(object?)" } else { "" };
        let value = format!("({}?){}feature", service.full_name(), boxing);
        if thread_safe {
            branch.line(format!("Interlocked.Exchange(ref {}, {});", field, value));
        } else {
            branch.line(format!("{} = {};", field, value));
        }

        if info.is_returnable {
            branch.line("return true;");
        }
    }

    let mut otherwise = body.block("else");
    otherwise.line(fallthrough);
}
