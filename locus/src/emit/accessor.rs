use super::writer::SourceWriter;
use crate::model::{ContainerRegistration, Registration};

/// Backing fields, one per registration, followed by a blank line
pub(super) fn write_fields(writer: &mut SourceWriter, container: &ContainerRegistration) {
    if container.registrations.is_empty() {
        return;
    }

    for registration in &container.registrations {
        writer.line(format!(
            "private {}? {};",
            registration.service_type().full_name(),
            registration.variable_name()
        ));
    }
    writer.blank();
}

/// `{access} partial T? Get<T>()` with its dispatch chain
///
/// Invalid containers get a body that only returns `default`.
pub(super) fn write_accessor(writer: &mut SourceWriter, container: &ContainerRegistration) {
    let details = &container.details;
    let t = &details.type_param_name;

    let mut body = writer.block(format!(
        "{} partial {}? {}<{}>()",
        details.method.visibility.keyword(),
        t,
        details.method.item.name,
        t
    ));

    if !container.is_valid() {
        body.line("return default;");
        return;
    }

    for registration in &container.registrations {
        write_branch(&mut body, t, registration, container.options.is_thread_safe);
        body.blank();
    }

    for (n, delegation) in container.delegations.iter().enumerate() {
        let n = n + 1;
        {
            let mut branch = body.block(format!(
                "if ({} is {} other{n} && other{n}.Get<{t}>() is {t} result{n})",
                delegation.access_expression(),
                delegation.value_type.full_name(),
            ));
            branch.line(format!("return result{};", n));
        }
        body.blank();
    }

    body.line("return default;");
}

fn write_branch(writer: &mut SourceWriter, t: &str, registration: &Registration, thread_safe: bool) {
    let service = registration.service_type();
    let field = registration.variable_name();

    let mut branch = writer.block(format!("if (typeof({}) == typeof({}))", t, service.full_name()));
    {
        let mut create = branch.block(format!("if ({} is null)", field));
        let instance = create_instance(registration);
        if thread_safe {
            create.line(format!(
                "Interlocked.CompareExchange(ref {}, {}, null);",
                field, instance
            ));
        } else {
            create.line(format!("{} = {};", field, instance));
        }
    }

    branch.blank();
    let boxing = if service.kind().needs_boxing() { "(object)" } else { "" };
    branch.line(format!("return ({}){}{};", t, boxing, field));
}

fn create_instance(registration: &Registration) -> String {
    match registration {
        Registration::Type(t) => format!("new {}()", t.implementation_type.full_name()),
        Registration::Factory(f) => format!("{}()", f.method.name),
    }
}
