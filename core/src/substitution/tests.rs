#![allow(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::type_model::InMemoryTypeModel;

fn class_in(model: &InMemoryTypeModel, name: &str) -> Arc<ClassDecl> {
    model.resolve_type_by_name(None, name).unwrap().unwrap()
}

fn bound(map: &SubstitutionMap, name: &str) -> String {
    map.get(name).unwrap().java_source()
}

#[test]
fn test_generic_base_with_checked_exception() {
    let model = InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.MyBase")
            .with_type_parameter("K", Vec::<String>::new())
            .with_type_parameter("L", ["QException;"]),
        ClassDecl::new("testpkg.MyClass").extending("QMyBase<QString;QMyException;>;"),
        ClassDecl::new("testpkg.MyException").extending("QException;"),
    ]);
    let class = class_in(&model, "testpkg.MyClass");

    let map = substitution_for_ancestor(&model, &class, &TypeName::from("testpkg.MyBase")).unwrap();
    assert_eq!(bound(&map, "K"), "java.lang.String");
    assert_eq!(bound(&map, "L"), "testpkg.MyException");
}

#[test]
fn test_multi_level_composition() {
    let model = InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.C")
            .with_type_parameter("X", Vec::<String>::new())
            .with_type_parameter("Y", Vec::<String>::new()),
        ClassDecl::new("testpkg.B")
            .with_type_parameter("U", Vec::<String>::new())
            .extending("QC<QU;QInteger;>;"),
        ClassDecl::new("testpkg.A")
            .with_type_parameter("T", Vec::<String>::new())
            .extending("QB<Qjava.util.List<QT;>;>;"),
    ]);
    let class = class_in(&model, "testpkg.A");

    let map = substitution_for_ancestor(&model, &class, &TypeName::from("testpkg.C")).unwrap();
    assert_eq!(bound(&map, "X"), "java.util.List<T>");
    assert_eq!(bound(&map, "Y"), "java.lang.Integer");

    let mut root = SubstitutionMap::new();
    root.bind("T", TypeSignature::class("java.lang.String"));
    let concrete = map.compose(&root);
    assert_eq!(bound(&concrete, "X"), "java.util.List<java.lang.String>");
}

#[test]
fn test_raw_usage_binds_erasure() {
    let model = InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.Holder").with_type_parameter("N", ["QNumber;"]),
        ClassDecl::new("testpkg.Plain").with_type_parameter("P", Vec::<String>::new()),
        ClassDecl::new("testpkg.RawHolder").extending("QHolder;"),
        ClassDecl::new("testpkg.RawPlain").extending("QPlain;"),
    ]);

    let holder = substitution_for_ancestor(
        &model,
        &class_in(&model, "testpkg.RawHolder"),
        &TypeName::from("testpkg.Holder"),
    )
    .unwrap();
    assert_eq!(bound(&holder, "N"), "java.lang.Number");

    let plain = substitution_for_ancestor(
        &model,
        &class_in(&model, "testpkg.RawPlain"),
        &TypeName::from("testpkg.Plain"),
    )
    .unwrap();
    assert_eq!(bound(&plain, "P"), "java.lang.Object");
}

#[test]
fn test_interfaces_are_walked_after_superclass() {
    let model = InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.Named").with_type_parameter("N", Vec::<String>::new()),
        ClassDecl::new("testpkg.Base"),
        ClassDecl::new("testpkg.Impl")
            .extending("QBase;")
            .implementing("QNamed<QString;>;"),
    ]);
    let class = class_in(&model, "testpkg.Impl");

    let chain = ancestors(&model, &class, &SubstitutionMap::identity(&class)).unwrap();
    let names: Vec<_> = chain.iter().map(|a| a.class.name.to_string()).collect();
    assert_eq!(names, vec!["testpkg.Impl", "testpkg.Base", "testpkg.Named"]);
    assert_eq!(bound(&chain[2].substitution, "N"), "java.lang.String");
}

#[test]
fn test_not_an_ancestor() {
    let model = InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.MyClass"),
        ClassDecl::new("testpkg.Unrelated"),
    ]);
    let class = class_in(&model, "testpkg.MyClass");

    let error =
        substitution_for_ancestor(&model, &class, &TypeName::from("testpkg.Unrelated")).unwrap_err();
    assert!(matches!(
        error.current_context(),
        Error::NotAnAncestor { ancestor, .. } if ancestor == "testpkg.Unrelated"
    ));
}

#[test]
fn test_class_is_its_own_ancestor() {
    let model =
        InMemoryTypeModel::from_classes([ClassDecl::new("testpkg.Generic")
            .with_type_parameter("T", Vec::<String>::new())]);
    let class = class_in(&model, "testpkg.Generic");

    let map = substitution_for_ancestor(&model, &class, &TypeName::from("testpkg.Generic")).unwrap();
    assert_eq!(map, SubstitutionMap::identity(&class));
}

#[test]
fn test_inheritance_cycle_terminates() {
    let model = InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.Left").extending("QRight;"),
        ClassDecl::new("testpkg.Right").extending("QLeft;"),
    ]);
    let class = class_in(&model, "testpkg.Left");

    let chain = ancestors(&model, &class, &SubstitutionMap::new()).unwrap();
    assert_eq!(chain.len(), 2);
}

#[test]
fn test_missing_supertype_ends_branch() {
    let model = InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.Child").extending("Qjava.util.AbstractList<QString;>;")
    ]);
    let class = class_in(&model, "testpkg.Child");

    let chain = ancestors(&model, &class, &SubstitutionMap::new()).unwrap();
    assert_eq!(chain.len(), 1);
}

#[test]
fn test_malformed_supertype_is_fatal() {
    let model = InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.Broken").extending("QBase<")
    ]);
    let class = class_in(&model, "testpkg.Broken");

    let error = ancestors(&model, &class, &SubstitutionMap::new()).unwrap_err();
    assert!(matches!(
        error.current_context(),
        Error::MalformedSignature { .. }
    ));
}
