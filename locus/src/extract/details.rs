use crate::diagnostics::{Error, ErrorKind};
use crate::host::{MethodSymbol, TypeId, TypeOracle, TypeRef};
use crate::model::{ContainerDetails, MethodReference, Visible};

/// Describe where the accessor lives and check its shape
///
/// The accessor must take no parameters and declare exactly one type
/// parameter that is also its return type. Each violation becomes an
/// `InvalidGenericGetMethod` error.
pub(crate) fn build_details<O>(
    oracle: &O,
    owner: TypeId,
    method: &MethodSymbol,
) -> (ContainerDetails, Vec<Error>)
where
    O: TypeOracle + ?Sized,
{
    let mut chain = Vec::new();
    let mut current = Some(owner);
    let mut outermost = owner;
    while let Some(id) = current {
        let symbol = oracle.symbol(id);
        chain.push(Visible::new(oracle.descriptor(id), symbol.accessibility));
        outermost = id;
        current = oracle.containing_type(id);
    }
    chain.reverse();

    let type_param_name = match method.type_parameters.as_slice() {
        [only] => only.clone(),
        _ => String::new(),
    };

    let details = ContainerDetails {
        namespace: oracle.symbol(outermost).namespace.clone(),
        type_chain: chain,
        method: Visible::new(MethodReference::new(&method.name), method.accessibility),
        type_param_name,
    };

    let mut errors = Vec::new();
    let shape_error = || {
        Error::new(
            ErrorKind::InvalidGenericGetMethod,
            method.location.clone(),
            vec![method.name.clone()],
        )
    };

    if !method.parameters.is_empty() {
        errors.push(shape_error());
    }

    if method.type_parameters.len() != 1 {
        errors.push(shape_error());
    } else if oracle.resolve_in(method, &method.return_type) != TypeRef::TypeParameter(0) {
        errors.push(shape_error());
    }

    (details, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ParameterSymbol, SymbolTable};
    use crate::model::Accessibility;
    use crate::testing::CompilationBuilder;

    fn accessor(type_params: &[&str], return_type: &str, params: usize) -> MethodSymbol {
        let mut method = MethodSymbol::new("Get", return_type);
        method.type_parameters = type_params.iter().map(|s| s.to_string()).collect();
        method.parameters = (0..params)
            .map(|i| ParameterSymbol {
                name: format!("p{}", i),
                ty: "int".to_string(),
            })
            .collect();
        method
    }

    #[test]
    fn test_nested_chain_outermost_first() {
        let compilation = CompilationBuilder::new()
            .class("Test", "Factory", Accessibility::Public)
            .nested_class("Test.Factory", "Other", Accessibility::Private)
            .build();
        let table = SymbolTable::new(&compilation).unwrap();
        let owner = table.resolve("Test.Factory+Other").unwrap();

        let (details, errors) = build_details(&table, owner, &accessor(&["T"], "T", 0));
        assert!(errors.is_empty());
        assert_eq!(details.namespace, "Test");
        assert_eq!(details.type_param_name, "T");

        let names: Vec<_> = details
            .type_chain
            .iter()
            .map(|t| (t.item.simple_name().to_string(), t.visibility))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Factory".to_string(), Accessibility::Public),
                ("Other".to_string(), Accessibility::Private),
            ]
        );
    }

    #[test]
    fn test_shape_violations() {
        let compilation = CompilationBuilder::new()
            .class("Test", "Factory", Accessibility::Public)
            .interface("Test", "ITest")
            .build();
        let table = SymbolTable::new(&compilation).unwrap();
        let owner = table.resolve("Test.Factory").unwrap();

        let (_, errors) = build_details(&table, owner, &accessor(&["T"], "T", 1));
        assert_eq!(errors.len(), 1);

        let (details, errors) = build_details(&table, owner, &accessor(&["T", "U"], "T", 0));
        assert_eq!(errors.len(), 1);
        assert_eq!(details.type_param_name, "");

        let (_, errors) = build_details(&table, owner, &accessor(&[], "Test.ITest", 2));
        assert_eq!(errors.len(), 2);

        let (_, errors) = build_details(&table, owner, &accessor(&["T"], "Test.ITest", 0));
        assert_eq!(errors.len(), 1);
        assert!(errors
            .iter()
            .all(|e| e.kind == ErrorKind::InvalidGenericGetMethod));
        assert_eq!(errors[0].message_args, vec!["Get".to_string()]);
    }
}
