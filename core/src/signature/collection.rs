//! Collection-family recognition and element extraction

use error_stack::Report;
use strum::{AsRefStr, Display, EnumString};

use super::{TypeArgument, TypeSignature};
use crate::error::{Error, Result};
use crate::type_model::TypeModelProvider;
use crate::type_name::TypeName;

const JAVA_UTIL_PACKAGE: &str = "java.util";
const JAVA_UTIL_PREFIX: &str = "java.util.";

/// The closed set of `java.util` collection types that get element accumulators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
pub enum CollectionFamily {
    /// `java.util.Collection`
    Collection,
    /// `java.util.List`
    List,
    /// `java.util.ArrayList`
    ArrayList,
    /// `java.util.LinkedList`
    LinkedList,
    /// `java.util.Vector`
    Vector,
    /// `java.util.Set`
    Set,
    /// `java.util.HashSet`
    HashSet,
    /// `java.util.LinkedHashSet`
    LinkedHashSet,
    /// `java.util.SortedSet`
    SortedSet,
    /// `java.util.NavigableSet`
    NavigableSet,
    /// `java.util.TreeSet`
    TreeSet,
}

impl CollectionFamily {
    /// Recognize a fully-qualified `java.util` collection name
    pub fn from_type_name(name: &TypeName) -> Option<Self> {
        name.as_str()
            .strip_prefix(JAVA_UTIL_PREFIX)
            .and_then(|simple| simple.parse().ok())
    }

    /// Recognize a collection written by its simple name (`List` in `QList<QPerson;>;`)
    pub fn from_simple_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// `java.util.List` for [`CollectionFamily::List`]
    pub fn qualified_name(self) -> TypeName {
        TypeName::in_package(JAVA_UTIL_PACKAGE, self.as_ref())
    }

    /// Concrete class instantiated when the collection is created lazily
    pub const fn implementation(self) -> &'static str {
        match self {
            Self::Collection | Self::List | Self::ArrayList => "java.util.ArrayList",
            Self::LinkedList => "java.util.LinkedList",
            Self::Vector => "java.util.Vector",
            Self::Set | Self::LinkedHashSet => "java.util.LinkedHashSet",
            Self::HashSet => "java.util.HashSet",
            Self::SortedSet | Self::NavigableSet | Self::TreeSet => "java.util.TreeSet",
        }
    }
}

/// How the element type argument was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ElementVariance {
    /// `List<X>`
    Exact,
    /// `List<? extends X>`
    Extends,
    /// `List<? super X>`
    Super,
    /// `List<?>`
    Unbounded,
}

/// Element description of a collection-typed mutator parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionElement {
    /// Raw collection type as declared
    pub collection:     TypeName,
    /// Class instantiated for lazily created collections
    pub implementation: TypeName,
    /// Element type; the wildcard bound for `? extends` / `? super`, `Object` for `?`
    pub element:        TypeSignature,
    /// How the element argument was written
    pub variance:       ElementVariance,
}

impl CollectionElement {
    /// Whether a nested element builder may be offered for this element
    pub fn allows_nested_builder(&self) -> bool {
        self.variance != ElementVariance::Unbounded
    }

    /// Whether a caller-supplied collection can be copied into the tracked implementation
    pub fn allows_copy(&self) -> bool {
        self.variance != ElementVariance::Super
    }

    /// `java.util.ArrayList<E>` for the tracked backing collection
    pub fn implementation_source(&self) -> String {
        format!(
            "{}<{}>",
            self.implementation,
            self.element.java_reference_source()
        )
    }
}

/// Extract the element of a collection-family signature
///
/// Returns `Ok(None)` for anything the provider does not consider a collection. A collection
/// with zero or several type arguments fails with `UnsupportedCollectionShape`.
pub fn collection_element(
    signature: &TypeSignature,
    provider: &dyn TypeModelProvider,
) -> Result<Option<CollectionElement>> {
    let TypeSignature::Class {
        name, arguments, ..
    } = signature
    else {
        return Ok(None);
    };

    if !provider.is_collection_family(name) {
        return Ok(None);
    }

    let [argument] = arguments.as_slice() else {
        return Err(Report::new(Error::UnsupportedCollectionShape {
            type_name: name.to_string(),
            found:     arguments.len(),
        })
        .attach(format!("Collection signature: {signature}")));
    };

    let (element, variance) = match argument {
        TypeArgument::Exact(element) => (element.clone(), ElementVariance::Exact),
        TypeArgument::Extends(bound) => (bound.clone(), ElementVariance::Extends),
        TypeArgument::Super(bound) => (bound.clone(), ElementVariance::Super),
        TypeArgument::Unbounded => (TypeSignature::object(), ElementVariance::Unbounded),
    };

    let implementation = CollectionFamily::from_type_name(name).map_or_else(
        || name.clone(),
        |family| TypeName::from(family.implementation()),
    );

    Ok(Some(CollectionElement {
        collection: name.clone(),
        implementation,
        element,
        variance,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test code")]
mod tests {
    use super::*;
    use crate::signature::parse_signature;
    use crate::type_model::InMemoryTypeModel;

    fn element_of(text: &str) -> Result<Option<CollectionElement>> {
        let model = InMemoryTypeModel::new();
        collection_element(&parse_signature(text).unwrap(), &model)
    }

    #[test]
    fn test_family_recognition() {
        assert_eq!(
            CollectionFamily::from_type_name(&TypeName::from("java.util.List")),
            Some(CollectionFamily::List)
        );
        assert_eq!(
            CollectionFamily::from_type_name(&TypeName::from("java.util.NavigableSet")),
            Some(CollectionFamily::NavigableSet)
        );
        assert_eq!(
            CollectionFamily::from_type_name(&TypeName::from("java.util.Map")),
            None
        );
        assert_eq!(
            CollectionFamily::from_type_name(&TypeName::from("testpkg.List")),
            None
        );
    }

    #[test]
    fn test_simple_name_recognition() {
        assert_eq!(
            CollectionFamily::from_simple_name("SortedSet"),
            Some(CollectionFamily::SortedSet)
        );
        assert_eq!(CollectionFamily::from_simple_name("Map"), None);
        assert_eq!(CollectionFamily::from_simple_name("java.util.List"), None);
        assert_eq!(
            CollectionFamily::List.qualified_name().as_str(),
            "java.util.List"
        );
    }

    #[test]
    fn test_exact_element() {
        let element = element_of("Ljava/util/List<Ltestpkg/Person;>;")
            .unwrap()
            .unwrap();
        assert_eq!(element.element.java_source(), "testpkg.Person");
        assert_eq!(element.variance, ElementVariance::Exact);
        assert_eq!(element.implementation.as_str(), "java.util.ArrayList");
        assert_eq!(
            element.implementation_source(),
            "java.util.ArrayList<testpkg.Person>"
        );
    }

    #[test]
    fn test_wildcard_elements() {
        let extends = element_of("Ljava/util/Set<+Ltestpkg/MyData;>;")
            .unwrap()
            .unwrap();
        assert_eq!(extends.element.java_source(), "testpkg.MyData");
        assert_eq!(extends.variance, ElementVariance::Extends);
        assert_eq!(extends.implementation.as_str(), "java.util.LinkedHashSet");

        let lower = element_of("Ljava/util/SortedSet<-Ljava/lang/Integer;>;")
            .unwrap()
            .unwrap();
        assert_eq!(lower.variance, ElementVariance::Super);
        assert!(!lower.allows_copy());
        assert_eq!(lower.implementation.as_str(), "java.util.TreeSet");

        let unbounded = element_of("Ljava/util/Collection<*>;").unwrap().unwrap();
        assert_eq!(unbounded.element, TypeSignature::object());
        assert!(!unbounded.allows_nested_builder());
    }

    #[test]
    fn test_unsupported_shapes() {
        let raw = element_of("Ljava/util/List;").unwrap_err();
        assert!(matches!(
            raw.current_context(),
            Error::UnsupportedCollectionShape { found: 0, .. }
        ));
    }

    #[test]
    fn test_non_collections_are_ignored() {
        assert!(element_of("Ljava/util/Map<TK;TV;>;").unwrap().is_none());
        assert!(element_of("I").unwrap().is_none());
        assert!(element_of("Ltestpkg/Person;").unwrap().is_none());
    }
}
