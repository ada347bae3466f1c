//! Type models shared by the graph, emitter and generation tests

use crate::graph::MutatorRef;
use crate::type_model::{ClassDecl, ClassKind, InMemoryTypeModel, MethodDecl};

pub const STRING: &str = "Qjava.lang.String;";

/// `MyClass` without any mutators
pub fn empty_class() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([ClassDecl::new("testpkg.MyClass")])
}

/// `MyClass` with a primitive and a string property
pub fn simple_fields() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([ClassDecl::new("testpkg.MyClass")
        .with_method(MethodDecl::setter("setField", "I"))
        .with_method(MethodDecl::setter("setName", "QString;"))])
}

/// `MyClass` whose `field` property is another `MyClass`
pub fn self_reference() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([ClassDecl::new("testpkg.MyClass")
        .with_method(MethodDecl::setter("setField", "QMyClass;"))
        .with_method(MethodDecl::setter("setDataField", "QString;"))])
}

/// `MyClass` with an object property and a list of `? extends MyData`
pub fn wildcard_collection() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.MyClass")
            .with_method(MethodDecl::setter("setField", "QMyData;"))
            .with_method(MethodDecl::setter(
                "setFields",
                "Qjava.util.List<+QMyData;>;",
            )),
        ClassDecl::new("testpkg.MyData").with_method(MethodDecl::setter("setDataField", STRING)),
    ])
}

/// `Company` / `Person` / `Address` with some mutators left out of the explicit selection
pub fn company() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.Company")
            .with_method(MethodDecl::setter("setName", STRING))
            .with_method(MethodDecl::setter(
                "setEmployees",
                "Qjava.util.List<Qtestpkg.Person;>;",
            ))
            .with_method(MethodDecl::setter("setTaxId", STRING)),
        ClassDecl::new("testpkg.Person")
            .with_method(MethodDecl::setter("setName", STRING))
            .with_method(MethodDecl::setter("setAge", "I"))
            .with_method(MethodDecl::setter("setAddress", "Qtestpkg.Address;")),
        ClassDecl::new("testpkg.Address")
            .with_method(MethodDecl::setter("setStreet", STRING))
            .with_method(MethodDecl::setter("setCity", STRING)),
    ])
}

/// The explicit selection used with [`company`]
pub fn company_mutators() -> Vec<MutatorRef> {
    vec![
        MutatorRef::new("testpkg.Company", "setName", [STRING]),
        MutatorRef::new(
            "testpkg.Company",
            "setEmployees",
            ["Qjava.util.List<Qtestpkg.Person;>;"],
        ),
        MutatorRef::new("testpkg.Person", "setName", [STRING]),
        MutatorRef::new("testpkg.Person", "setAge", ["I"]),
        MutatorRef::new("testpkg.Person", "setAddress", ["Qtestpkg.Address;"]),
        MutatorRef::new("testpkg.Address", "setCity", [STRING]),
    ]
}

/// `Company` / `Person` / `Address` written with simple names, as source files declare them
pub fn company_scenario() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.Company")
            .with_method(MethodDecl::setter("setName", "QString;"))
            .with_method(MethodDecl::setter("setLocation", "QAddress;"))
            .with_method(MethodDecl::setter("setEmployees", "QList<QPerson;>;")),
        ClassDecl::new("testpkg.Person")
            .with_method(MethodDecl::setter("setFirstName", "QString;"))
            .with_method(MethodDecl::setter("setLastName", "QString;"))
            .with_method(MethodDecl::setter("setAddress", "QAddress;")),
        ClassDecl::new("testpkg.Address")
            .with_method(MethodDecl::setter("setCity", "QString;"))
            .with_method(MethodDecl::setter("setStreet", "QString;"))
            .with_method(MethodDecl::setter("setNumber", "I")),
    ])
}

/// Every mutator of [`company_scenario`], listed explicitly
pub fn company_scenario_mutators() -> Vec<MutatorRef> {
    vec![
        MutatorRef::new("testpkg.Company", "setName", ["QString;"]),
        MutatorRef::new("testpkg.Company", "setLocation", ["QAddress;"]),
        MutatorRef::new("testpkg.Company", "setEmployees", ["QList<QPerson;>;"]),
        MutatorRef::new("testpkg.Person", "setFirstName", ["QString;"]),
        MutatorRef::new("testpkg.Person", "setLastName", ["QString;"]),
        MutatorRef::new("testpkg.Person", "setAddress", ["QAddress;"]),
        MutatorRef::new("testpkg.Address", "setCity", ["QString;"]),
        MutatorRef::new("testpkg.Address", "setStreet", ["QString;"]),
        MutatorRef::new("testpkg.Address", "setNumber", ["I"]),
    ]
}

/// `MyClass extends MyBase<String, MyException>` where `MyBase.setField(K) throws L`
pub fn generic_base() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.MyBase")
            .with_type_parameter("K", Vec::<String>::new())
            .with_type_parameter("L", ["QException;"])
            .with_method(MethodDecl::setter("setField", "QK;").throwing("QL;")),
        ClassDecl::new("testpkg.MyClass").extending("QMyBase<QString;QMyException;>;"),
        ClassDecl::new("testpkg.MyException").extending("QException;"),
    ])
}

/// `Generic<T>` with a list of `T`
pub fn generic_root() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([ClassDecl::new("testpkg.Generic")
        .with_type_parameter("T", Vec::<String>::new())
        .with_method(MethodDecl::setter("setElements", "Qjava.util.List<QT;>;"))])
}

/// `MyClass` with a `Generic<String>` property
pub fn generic_field() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.MyClass")
            .with_method(MethodDecl::setter("setField", "QGeneric<QString;>;")),
        ClassDecl::new("testpkg.Generic")
            .with_type_parameter("T", Vec::<String>::new())
            .with_method(MethodDecl::setter("setGenericField", "QT;")),
    ])
}

/// `Property<R extends Room, RP extends RatePlan>` holding a list of `R`
pub fn bounded_generic_root() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.Property")
            .with_type_parameter("R", ["QRoom;"])
            .with_type_parameter("RP", ["QRatePlan;"])
            .with_method(MethodDecl::setter("setRooms", "Qjava.util.List<QR;>;"))
            .with_method(MethodDecl::setter("setRatePlan", "QRP;")),
        ClassDecl::new("testpkg.Room").with_method(MethodDecl::setter("setName", STRING)),
        ClassDecl::new("testpkg.RatePlan").with_kind(ClassKind::AbstractClass),
    ])
}

/// Targets that cannot get nested builders for different reasons
pub fn unbuildable_targets() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.MyClass")
            .with_method(MethodDecl::setter("setMissing", "QMissing;"))
            .with_method(MethodDecl::setter("setShape", "QShape;"))
            .with_method(MethodDecl::setter("setCompiled", "QCompiled;"))
            .with_method(MethodDecl::setter("setChoice", "QChoice;"))
            .with_method(MethodDecl::setter("setShapes", "Qjava.util.Set<QShape;>;"))
            .with_method(MethodDecl::setter("setAnything", "Qjava.util.List<*>;"))
            .with_method(MethodDecl::setter("setAmount", "Qjava.math.BigDecimal;")),
        ClassDecl::new("testpkg.Shape").with_kind(ClassKind::Interface),
        ClassDecl::new("testpkg.Compiled").binary(),
        ClassDecl::new("testpkg.Choice").with_kind(ClassKind::Enum),
    ])
}

/// `A -> B -> C -> D`, each holding the next
pub fn chain() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.A").with_method(MethodDecl::setter("setNext", "QB;")),
        ClassDecl::new("testpkg.B").with_method(MethodDecl::setter("setNext", "QC;")),
        ClassDecl::new("testpkg.C").with_method(MethodDecl::setter("setNext", "QD;")),
        ClassDecl::new("testpkg.D").with_method(MethodDecl::setter("setValue", "I")),
    ])
}

/// `A` and `B` referencing each other
pub fn mutual_reference() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.A").with_method(MethodDecl::setter("setPartner", "QB;")),
        ClassDecl::new("testpkg.B").with_method(MethodDecl::setter("setOwner", "QA;")),
    ])
}

/// `Wrapper<T>` holding a `Holder<T>`, so the holder's builder stays generic
pub fn generic_holder() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.Wrapper")
            .with_type_parameter("T", Vec::<String>::new())
            .with_method(MethodDecl::setter("setHolder", "QHolder<QT;>;")),
        ClassDecl::new("testpkg.Holder")
            .with_type_parameter("T", Vec::<String>::new())
            .with_method(MethodDecl::setter("setValue", "QT;")),
    ])
}

/// `MyClass` with a collection whose mutator throws
pub fn throwing_collection() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([
        ClassDecl::new("testpkg.MyClass").with_method(
            MethodDecl::setter("setItems", "Qjava.util.Set<QItem;>;").throwing("QInvalidItemException;"),
        ),
        ClassDecl::new("testpkg.Item").with_method(MethodDecl::setter("setCode", STRING)),
        ClassDecl::new("testpkg.InvalidItemException").extending("QException;"),
    ])
}

/// `MyClass` whose `setField` is overloaded
pub fn overloaded_setter() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([ClassDecl::new("testpkg.MyClass")
        .with_method(MethodDecl::setter("setField", "I"))
        .with_method(MethodDecl::setter("setField", STRING))])
}

/// `Next` holding another `Next`; its nested builder would share the root builder's name
pub fn self_named_property() -> InMemoryTypeModel {
    InMemoryTypeModel::from_classes([ClassDecl::new("testpkg.Next")
        .with_method(MethodDecl::setter("setNext", "QNext;"))
        .with_method(MethodDecl::setter("setValue", "I"))])
}
