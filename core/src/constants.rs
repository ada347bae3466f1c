// ============================================================================
// TRAVERSAL CONSTANTS
// ============================================================================

/// Maximum nesting depth for the type graph traversal before targets are demoted
pub const MAX_TRAVERSAL_DEPTH: usize = 32;

// ============================================================================
// NAMING DEFAULTS
// ============================================================================

/// Default prefix for value setters (`withName(..)`)
pub const DEFAULT_SET_PREFIX: &str = "with";
/// Default prefix for collection element adders (`withAddedItem(..)`)
pub const DEFAULT_ADD_PREFIX: &str = "withAdded";
/// Default prefix for methods that close a nested builder (`endItem()`)
pub const DEFAULT_END_SUFFIX: &str = "end";
/// Default name of the generated outer class
pub const DEFAULT_BUILDER_TYPE_NAME: &str = "GeneratedBuilder";

/// Prefix a method must carry to be treated as a mutator
pub const MUTATOR_PREFIX: &str = "set";
/// Getter prefixes consulted when getters are required
pub const GETTER_PREFIXES: [&str; 2] = ["get", "is"];

// ============================================================================
// GENERATED SOURCE CONSTANTS
// ============================================================================

/// Type parameter carried by every builder base to return the concrete builder
pub const SELF_TYPE_PARAMETER: &str = "GeneratorT";
/// Suffix of the per-type builder base classes
pub const BUILDER_BASE_SUFFIX: &str = "BuilderBase";
/// Suffix of the root builder and nested builder classes
pub const BUILDER_SUFFIX: &str = "Builder";
/// Suffix of the fields that track lazily created collections
pub const COLLECTION_FIELD_SUFFIX: &str = "Collection";
/// Name of the terminal method on the root builder
pub const BUILD_METHOD: &str = "build";
/// Name of the accessor every builder exposes for its instance
pub const INSTANCE_ACCESSOR: &str = "getInstance";

// ============================================================================
// TYPE NAME CONSTANTS
// ============================================================================

/// Root of the Java class hierarchy
pub const TYPE_OBJECT: &str = "java.lang.Object";
/// Qualified name of `String`
pub const TYPE_STRING: &str = "java.lang.String";

/// Package whose members are visible without qualification
pub const JAVA_LANG_PACKAGE: &str = "java.lang";

/// Platform package prefixes; anything below them is treated as an opaque value type
pub const PLATFORM_PACKAGE_PREFIXES: [&str; 2] = ["java.", "javax."];

/// Simple names of the `java.lang` types that resolve without an import
pub const JAVA_LANG_IMPLICIT: &[&str] = &[
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "Comparable",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "Integer",
    "Iterable",
    "Long",
    "Number",
    "Object",
    "Runnable",
    "RuntimeException",
    "Short",
    "String",
    "StringBuilder",
    "Throwable",
    "Void",
];

/// Reserved words that cannot be used as generated identifiers
pub const JAVA_KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

/// Returns true if `word` is a Java reserved word
pub fn is_java_keyword(word: &str) -> bool {
    JAVA_KEYWORDS.contains(&word)
}

/// Returns true if `text` is a syntactically valid Java identifier that is not reserved
pub fn is_java_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !is_java_keyword(text)
}
