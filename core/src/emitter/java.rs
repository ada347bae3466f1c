//! Java rendering of a type graph
//!
//! The generated unit holds, inside the outer class:
//!
//! - a static factory named after the root, generic over the root's open parameters
//! - the root builder `<Root>Builder`, which owns the instance and exposes `build()`
//! - one `<Type>BuilderBase<.., GeneratorT>` per map node
//!
//! A nested builder is an inner class of the builder that opens it. It extends the target's base
//! with itself as `GeneratorT`, so every inherited setter keeps returning the nested builder, and
//! its end method hands the built instance back through the owner's value setter or adder.

use std::collections::{HashMap, HashSet};

use error_stack::Report;
use heck::ToLowerCamelCase;
use itertools::Itertools;

use super::collisions::MemberRegistry;
use super::naming::{BuilderNamingConvention, singularize};
use super::source_writer::SourceWriter;
use crate::constants::{
    BUILD_METHOD, BUILDER_BASE_SUFFIX, BUILDER_SUFFIX, COLLECTION_FIELD_SUFFIX,
    INSTANCE_ACCESSOR, SELF_TYPE_PARAMETER, is_java_keyword,
};
use crate::error::{Error, Result};
use crate::graph::{NodeId, SetterDescriptor, SetterKind, TypeGraph, TypeNode};
use crate::signature::{CollectionElement, ElementVariance, TypeSignature};

const INSTANCE_FIELD: &str = "instance";
const INSTANCE_PARAMETER: &str = "aInstance";
const VALUE_PARAMETER: &str = "aValue";
const ELEMENT_PARAMETER: &str = "aElement";
/// Infix of element builder classes: `EmployeesElementBuilder`
const ELEMENT_BUILDER_INFIX: &str = "Element";

/// What the members of one generated builder class share
struct ClassFrame {
    name:         String,
    /// Return type of chaining methods
    returns:      String,
    /// Expression chaining methods return
    returns_self: String,
}

/// A nested builder opened from one setter of its owner
struct NestedBuilder<'g> {
    target: &'g TypeNode,
    class:  String,
    /// Zero-argument method that opens the builder; its one-argument overload takes the result
    opener: String,
    end:    String,
}

pub(super) struct JavaEmitter<'g> {
    graph:             &'g TypeGraph,
    naming:            &'g BuilderNamingConvention,
    builder_type_name: &'g str,
    class_names:       HashMap<NodeId, String>,
    /// Root parameters each node's class declares: its open parameters plus whatever their
    /// bounds mention
    parameters:        HashMap<NodeId, Vec<String>>,
}

impl<'g> JavaEmitter<'g> {
    pub(super) fn new(
        graph: &'g TypeGraph,
        naming: &'g BuilderNamingConvention,
        builder_type_name: &'g str,
    ) -> Result<Self> {
        let root = graph.root();
        let root_builder = format!("{}{BUILDER_SUFFIX}", root.signature.display_name());
        if root_builder == builder_type_name {
            return Err(Report::new(Error::MethodNameCollision {
                builder: builder_type_name.to_string(),
                method:  root_builder,
                first:   "enclosing class".to_string(),
                second:  format!("root builder of {}", root.class_name),
            }));
        }

        let mut taken: HashSet<String> = [builder_type_name.to_string(), root_builder.clone()]
            .into_iter()
            .collect();
        let mut class_names = HashMap::from([(root.id, root_builder)]);
        for node in graph.map_nodes() {
            let stem = format!("{}{BUILDER_BASE_SUFFIX}", node.signature.display_name());
            let mut candidate = stem.clone();
            let mut counter = 2;
            while taken.contains(&candidate) {
                candidate = format!("{stem}{counter}");
                counter += 1;
            }
            taken.insert(candidate.clone());
            class_names.insert(node.id, candidate);
        }

        let parameters = graph
            .nodes()
            .iter()
            .map(|node| (node.id, declared_parameters(graph, node)))
            .collect();

        Ok(Self {
            graph,
            naming,
            builder_type_name,
            class_names,
            parameters,
        })
    }

    /// Render the whole compilation unit; nothing is produced if any name collides
    pub(super) fn render(&self, target_package: &str) -> Result<String> {
        self.check_members()?;

        let mut writer = SourceWriter::new();
        if !target_package.is_empty() {
            writer.line(format!("package {target_package};"));
            writer.blank();
        }
        writer.open(format!("public class {}", self.builder_type_name));
        self.write_factory(&mut writer);
        for node in self.graph.nodes() {
            writer.blank();
            self.write_builder(&mut writer, node);
        }
        writer.close();
        Ok(writer.finish())
    }

    fn class_name(&self, node: &TypeNode) -> &str {
        self.class_names.get(&node.id).map_or("", String::as_str)
    }

    fn parameters(&self, node: &TypeNode) -> &[String] {
        self.parameters
            .get(&node.id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `<R extends testpkg.Room, RP>` or nothing
    fn declaration(&self, node: &TypeNode) -> String {
        let parameters = self.parameters(node);
        if parameters.is_empty() {
            return String::new();
        }
        format!(
            "<{}>",
            parameters
                .iter()
                .map(|name| self.parameter_declaration(name))
                .join(", ")
        )
    }

    /// `<R, RP>` or nothing
    fn usage(&self, node: &TypeNode) -> String {
        let parameters = self.parameters(node);
        if parameters.is_empty() {
            String::new()
        } else {
            format!("<{}>", parameters.join(", "))
        }
    }

    fn parameter_declaration(&self, name: &str) -> String {
        let bounds = self
            .graph
            .root_parameters()
            .iter()
            .find(|parameter| parameter.name == name)
            .map(|parameter| parameter.bounds.as_slice())
            .unwrap_or_default();
        if bounds.is_empty() {
            name.to_string()
        } else {
            format!(
                "{name} extends {}",
                bounds.iter().map(TypeSignature::java_source).join(" & ")
            )
        }
    }

    /// `Base<T, Arg>` for a map node with `Arg` as its `GeneratorT`
    fn base_reference(&self, node: &TypeNode, self_argument: &str) -> String {
        let arguments = self
            .parameters(node)
            .iter()
            .map(String::as_str)
            .chain([self_argument])
            .join(", ");
        format!("{}<{arguments}>", self.class_name(node))
    }

    fn frame(&self, node: &TypeNode) -> ClassFrame {
        let name = self.class_name(node).to_string();
        if node.is_root {
            ClassFrame {
                returns: format!("{name}{}", self.usage(node)),
                returns_self: "this".to_string(),
                name,
            }
        } else {
            ClassFrame {
                returns: SELF_TYPE_PARAMETER.to_string(),
                returns_self: format!("({SELF_TYPE_PARAMETER}) this"),
                name,
            }
        }
    }

    fn nested_builder(&self, owner: &str, setter: &SetterDescriptor) -> Option<NestedBuilder<'g>> {
        let target = setter.target.and_then(|id| self.graph.node(id))?;
        let property = setter.property.as_str();
        match setter.kind {
            SetterKind::Object => Some(NestedBuilder {
                target,
                class: self.nested_class_name(owner, format!("{property}{BUILDER_SUFFIX}")),
                opener: self.naming.value_setter(property),
                end: self.naming.end_method(property),
            }),
            SetterKind::Collection => Some(NestedBuilder {
                target,
                class: self.nested_class_name(
                    owner,
                    format!("{property}{ELEMENT_BUILDER_INFIX}{BUILDER_SUFFIX}"),
                ),
                opener: self.naming.element_adder(property),
                end: self.naming.end_method(&singularize(property)),
            }),
            SetterKind::Simple => None,
        }
    }

    /// A nested class may not share the name of a class enclosing it; clashes get a numeric suffix
    fn nested_class_name(&self, owner: &str, candidate: String) -> String {
        let enclosing = [owner, self.builder_type_name, self.root_class_name()];
        if !enclosing.contains(&candidate.as_str()) {
            return candidate;
        }
        let mut suffix = 2_usize;
        loop {
            let name = format!("{candidate}{suffix}");
            if !enclosing.contains(&name.as_str()) {
                return name;
            }
            suffix += 1;
        }
    }

    /// Register every generated member and nested class, failing on the first clash
    fn check_members(&self) -> Result<()> {
        let mut registries = HashMap::new();
        for node in self.graph.nodes() {
            registries.insert(node.id, self.member_registry(node)?);
        }

        for node in self.graph.nodes() {
            let owner = self.class_name(node);
            let mut nested_types = MemberRegistry::new(owner);
            for setter in &node.setters {
                let Some(nested) = self.nested_builder(owner, setter) else {
                    continue;
                };
                let origin = setter.property.as_str();
                nested_types.nested_type(&nested.class, origin)?;

                if let Some(inherited) = registries.get(&nested.target.id) {
                    inherited
                        .inherited_by(nested.class.as_str())
                        .method(&nested.end, 0, origin)?;
                }
            }
        }
        Ok(())
    }

    fn root_class_name(&self) -> &str {
        self.class_name(self.graph.root())
    }

    fn member_registry(&self, node: &TypeNode) -> Result<MemberRegistry> {
        let mut registry = MemberRegistry::new(self.class_name(node));
        registry.field(INSTANCE_FIELD, INSTANCE_FIELD)?;
        registry.method(INSTANCE_ACCESSOR, 0, INSTANCE_ACCESSOR)?;
        if node.is_root {
            registry.method(BUILD_METHOD, 0, BUILD_METHOD)?;
        }

        for setter in &node.setters {
            let origin = setter.property.as_str();
            registry.method(&self.naming.value_setter(origin), 1, origin)?;
            if setter.kind == SetterKind::Collection {
                registry.field(&collection_field(origin), origin)?;
                registry.method(&self.naming.element_adder(origin), 1, origin)?;
            }
            if let Some(nested) = self.nested_builder(self.class_name(node), setter) {
                registry.method(&nested.opener, 0, origin)?;
            }
        }
        Ok(registry)
    }

    fn write_factory(&self, writer: &mut SourceWriter) {
        let root = self.graph.root();
        let builder = format!("{}{}", self.class_name(root), self.usage(root));
        let declaration = self.declaration(root);
        let generic = if declaration.is_empty() {
            String::new()
        } else {
            format!("{declaration} ")
        };

        writer.open(format!(
            "public static {generic}{builder} {}()",
            factory_name(root)
        ));
        writer.line(format!("return new {builder}();"));
        writer.close();
    }

    fn write_builder(&self, writer: &mut SourceWriter, node: &TypeNode) {
        let frame = self.frame(node);
        let instance_type = node.signature.java_source();

        if node.is_root {
            writer.open(format!(
                "public static class {}{}",
                frame.name,
                self.declaration(node)
            ));
        } else {
            let own = self.parameters(node).iter().map(|name| self.parameter_declaration(name));
            let generator = format!(
                "{SELF_TYPE_PARAMETER} extends {}",
                self.base_reference(node, SELF_TYPE_PARAMETER)
            );
            writer.line("@SuppressWarnings(\"unchecked\")");
            writer.open(format!(
                "public static class {}<{}>",
                frame.name,
                own.chain([generator]).join(", ")
            ));
        }

        writer.line(format!("private final {instance_type} {INSTANCE_FIELD};"));
        for setter in &node.setters {
            if let (SetterKind::Collection, Some(element)) = (setter.kind, &setter.element) {
                writer.line(format!(
                    "private {} {};",
                    tracking_type(setter, element),
                    collection_field(&setter.property)
                ));
            }
        }

        writer.blank();
        if node.is_root {
            writer.open(format!("public {}()", frame.name));
            writer.line(format!("{INSTANCE_FIELD} = new {instance_type}();"));
        } else {
            writer.open(format!(
                "protected {}({instance_type} {INSTANCE_PARAMETER})",
                frame.name
            ));
            writer.line(format!("{INSTANCE_FIELD} = {INSTANCE_PARAMETER};"));
        }
        writer.close();

        writer.blank();
        writer.open(format!("protected {instance_type} {INSTANCE_ACCESSOR}()"));
        writer.line(format!("return {INSTANCE_FIELD};"));
        writer.close();

        for setter in &node.setters {
            self.write_setter(writer, &frame, setter);
        }

        if node.is_root {
            writer.blank();
            writer.open(format!("public {instance_type} {BUILD_METHOD}()"));
            writer.line(format!("return {INSTANCE_FIELD};"));
            writer.close();
        }
        writer.close();
    }

    fn write_setter(&self, writer: &mut SourceWriter, frame: &ClassFrame, setter: &SetterDescriptor) {
        let throws = throws_clause(&setter.exceptions);
        let mutate = |argument: &str| format!("{INSTANCE_FIELD}.{}({argument});", setter.method_name);

        writer.blank();
        writer.open(format!(
            "public {} {}({} {VALUE_PARAMETER}){throws}",
            frame.returns,
            self.naming.value_setter(&setter.property),
            setter.declared_type.java_source()
        ));
        match (setter.kind, &setter.element) {
            (SetterKind::Collection, Some(element)) if element.allows_copy() => {
                let field = collection_field(&setter.property);
                writer.open(format!("if ({VALUE_PARAMETER} == null)"));
                writer.line(format!("{field} = null;"));
                writer.line(mutate(VALUE_PARAMETER));
                writer.chain("else");
                writer.line(format!(
                    "{field} = new {}({VALUE_PARAMETER});",
                    element.implementation_source()
                ));
                writer.line(mutate(&field));
                writer.close();
            }
            (SetterKind::Collection, Some(_)) => {
                writer.line(format!("{} = {VALUE_PARAMETER};", collection_field(&setter.property)));
                writer.line(mutate(VALUE_PARAMETER));
            }
            _ => writer.line(mutate(VALUE_PARAMETER)),
        }
        writer.line(format!("return {};", frame.returns_self));
        writer.close();

        if let (SetterKind::Collection, Some(element)) = (setter.kind, &setter.element) {
            self.write_adder(writer, frame, setter, element, &throws);
        }
        if let Some(nested) = self.nested_builder(&frame.name, setter) {
            self.write_nested(writer, frame, &nested, &throws);
        }
    }

    fn write_adder(
        &self,
        writer: &mut SourceWriter,
        frame: &ClassFrame,
        setter: &SetterDescriptor,
        element: &CollectionElement,
        throws: &str,
    ) {
        let field = collection_field(&setter.property);

        writer.blank();
        writer.open(format!(
            "public {} {}({} {ELEMENT_PARAMETER}){throws}",
            frame.returns,
            self.naming.element_adder(&setter.property),
            element.element.java_reference_source()
        ));
        writer.open(format!("if ({field} == null)"));
        writer.line(format!("{field} = new {}();", element.implementation_source()));
        writer.line(format!("{INSTANCE_FIELD}.{}({field});", setter.method_name));
        writer.close();
        writer.line(format!("{field}.add({ELEMENT_PARAMETER});"));
        writer.line(format!("return {};", frame.returns_self));
        writer.close();
    }

    fn write_nested(
        &self,
        writer: &mut SourceWriter,
        frame: &ClassFrame,
        nested: &NestedBuilder<'_>,
        throws: &str,
    ) {
        writer.blank();
        writer.open(format!("public {} {}()", nested.class, nested.opener));
        writer.line(format!("return new {}();", nested.class));
        writer.close();

        writer.blank();
        writer.open(format!(
            "public class {} extends {}",
            nested.class,
            self.base_reference(nested.target, &nested.class)
        ));
        writer.open(format!("public {}()", nested.class));
        writer.line(format!("super(new {}());", nested.target.signature.java_source()));
        writer.close();
        writer.blank();
        writer.open(format!("public {} {}(){throws}", frame.returns, nested.end));
        writer.line(format!(
            "return {}.this.{}({INSTANCE_ACCESSOR}());",
            frame.name, nested.opener
        ));
        writer.close();
        writer.close();
    }
}

/// Open parameters of `node` closed over the parameters their bounds mention, in root order
fn declared_parameters(graph: &TypeGraph, node: &TypeNode) -> Vec<String> {
    let mut wanted: HashSet<String> = node.open_parameters.iter().cloned().collect();
    loop {
        let before = wanted.len();
        for parameter in graph.root_parameters() {
            if wanted.contains(&parameter.name) {
                wanted.extend(parameter.bounds.iter().flat_map(TypeSignature::type_variables));
            }
        }
        if wanted.len() == before {
            break;
        }
    }

    graph
        .root_parameters()
        .iter()
        .filter(|parameter| wanted.contains(&parameter.name))
        .map(|parameter| parameter.name.clone())
        .collect()
}

/// `myClass` for `MyClass`; keywords get a trailing underscore
fn factory_name(root: &TypeNode) -> String {
    let mut name = root.signature.display_name().to_lower_camel_case();
    if is_java_keyword(&name) {
        name.push('_');
    }
    name
}

/// Type of the tracking field: the declared type when only the setter's own argument fits it
fn tracking_type(setter: &SetterDescriptor, element: &CollectionElement) -> String {
    if element.variance == ElementVariance::Super {
        setter.declared_type.java_source()
    } else {
        element.implementation_source()
    }
}

/// `fieldsCollection` for property `Fields`
fn collection_field(property: &str) -> String {
    format!("{}{COLLECTION_FIELD_SUFFIX}", property.to_lower_camel_case())
}

fn throws_clause(exceptions: &[TypeSignature]) -> String {
    if exceptions.is_empty() {
        String::new()
    } else {
        format!(
            " throws {}",
            exceptions.iter().map(TypeSignature::java_source).join(", ")
        )
    }
}
