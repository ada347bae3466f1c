//! Qualification of names written in source form (`Q...;`)

use super::{CollectionFamily, TypeArgument, TypeSignature, parse_signature};
use crate::constants::{JAVA_LANG_IMPLICIT, JAVA_LANG_PACKAGE};
use crate::error::Result;
use crate::type_model::{ClassDecl, TypeModelProvider};
use crate::type_name::TypeName;

/// Qualify every unresolved class name in `signature` as seen from `context`
///
/// A bare name matching one of `context`'s formal type parameters becomes a type variable. Names
/// the model knows are replaced by their declared name, implicit `java.lang` names and simple
/// collection-family names (`List`, `Set`, ..) are qualified, and anything else is kept as written.
pub fn resolve_names(
    signature: &TypeSignature,
    context: &ClassDecl,
    provider: &dyn TypeModelProvider,
) -> Result<TypeSignature> {
    match signature {
        TypeSignature::Primitive(_) | TypeSignature::TypeVariable(_) => Ok(signature.clone()),
        TypeSignature::Array(component) => Ok(TypeSignature::Array(Box::new(resolve_names(
            component, context, provider,
        )?))),
        TypeSignature::Class {
            name,
            arguments,
            resolved,
        } => {
            if !*resolved && arguments.is_empty() && context.type_parameter(name.as_str()).is_some()
            {
                return Ok(TypeSignature::TypeVariable(name.to_string()));
            }

            let arguments = arguments
                .iter()
                .map(|argument| resolve_argument(argument, context, provider))
                .collect::<Result<Vec<_>>>()?;

            let name = if *resolved {
                name.clone()
            } else {
                qualify(name, context, provider)?
            };

            Ok(TypeSignature::Class {
                name,
                arguments,
                resolved: true,
            })
        }
    }
}

fn resolve_argument(
    argument: &TypeArgument,
    context: &ClassDecl,
    provider: &dyn TypeModelProvider,
) -> Result<TypeArgument> {
    Ok(match argument {
        TypeArgument::Exact(signature) => {
            TypeArgument::Exact(resolve_names(signature, context, provider)?)
        }
        TypeArgument::Extends(signature) => {
            TypeArgument::Extends(resolve_names(signature, context, provider)?)
        }
        TypeArgument::Super(signature) => {
            TypeArgument::Super(resolve_names(signature, context, provider)?)
        }
        TypeArgument::Unbounded => TypeArgument::Unbounded,
    })
}

fn qualify(
    name: &TypeName,
    context: &ClassDecl,
    provider: &dyn TypeModelProvider,
) -> Result<TypeName> {
    let found = provider
        .resolve_type_by_name(Some(&context.name), name.as_str())
        .map_err(|report| report.attach(format!("Resolving '{name}' from {}", context.name)))?;

    if let Some(class) = found {
        return Ok(class.name.clone());
    }

    if !name.is_qualified() && JAVA_LANG_IMPLICIT.contains(&name.as_str()) {
        return Ok(TypeName::in_package(JAVA_LANG_PACKAGE, name.as_str()));
    }

    // Source files import these rather than declare them
    if !name.is_qualified()
        && let Some(family) = CollectionFamily::from_simple_name(name.as_str())
    {
        return Ok(family.qualified_name());
    }

    Ok(name.clone())
}

/// Parse a signature declared on `context` and qualify its names
pub fn parse_and_resolve(
    text: &str,
    context: &ClassDecl,
    provider: &dyn TypeModelProvider,
) -> Result<TypeSignature> {
    let parsed = parse_signature(text)
        .map_err(|report| report.attach(format!("Declared on {}", context.name)))?;
    resolve_names(&parsed, context, provider)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test code")]
mod tests {
    use super::*;
    use crate::type_model::InMemoryTypeModel;

    fn fixture() -> (InMemoryTypeModel, ClassDecl) {
        let context = ClassDecl::new("testpkg.MyClass").with_type_parameter("K", ["QString;"]);
        let model = InMemoryTypeModel::from_classes([
            context.clone(),
            ClassDecl::new("testpkg.MyData"),
            ClassDecl::new("otherpkg.Foreign"),
        ]);
        (model, context)
    }

    fn resolved(text: &str) -> String {
        let (model, context) = fixture();
        parse_and_resolve(text, &context, &model)
            .unwrap()
            .java_source()
    }

    #[test]
    fn test_resolution_rules() {
        assert_eq!(resolved("QMyData;"), "testpkg.MyData");
        assert_eq!(resolved("QForeign;"), "otherpkg.Foreign");
        assert_eq!(resolved("QString;"), "java.lang.String");
        assert_eq!(resolved("QInteger;"), "java.lang.Integer");
        assert_eq!(resolved("QUnknown;"), "Unknown");
        assert_eq!(resolved("Qjava.math.BigDecimal;"), "java.math.BigDecimal");
    }

    #[test]
    fn test_type_parameters_become_variables() {
        let (model, context) = fixture();
        let signature = parse_and_resolve("QK;", &context, &model).unwrap();
        assert_eq!(signature, TypeSignature::TypeVariable("K".to_string()));

        assert_eq!(
            resolved("Qjava.util.List<+QMyData;>;"),
            "java.util.List<? extends testpkg.MyData>"
        );
        assert_eq!(resolved("Qjava.util.List<QK;>;"), "java.util.List<K>");
    }

    #[test]
    fn test_simple_collection_names_are_qualified() {
        assert_eq!(
            resolved("QList<QMyData;>;"),
            "java.util.List<testpkg.MyData>"
        );
        assert_eq!(resolved("QTreeSet<QString;>;"), "java.util.TreeSet<java.lang.String>");
        assert_eq!(resolved("QMap<QString;QMyData;>;"), "Map<java.lang.String, testpkg.MyData>");
    }

    #[test]
    fn test_model_classes_shadow_collection_names() {
        let context = ClassDecl::new("testpkg.MyClass");
        let model = InMemoryTypeModel::from_classes([
            context.clone(),
            ClassDecl::new("testpkg.List").with_type_parameter("E", Vec::<String>::new()),
        ]);
        let signature = parse_and_resolve("QList<QString;>;", &context, &model).unwrap();
        assert_eq!(signature.java_source(), "testpkg.List<java.lang.String>");
    }

    #[test]
    fn test_binary_names_are_kept() {
        assert_eq!(resolved("Ltestpkg/Other;"), "testpkg.Other");
    }
}
