use super::*;

#[test]
fn only_scene_bindings_survive() {
    let root = TypeDef::scene_root();
    let base = TypeDef::derive("ShapeScene", root, None);
    let module = SceneModule::new("m")
        .bind("Scene", Binding::Type(root.clone()))
        .bind("ShapeScene", Binding::Type(base.clone()))
        .bind("Zeta", Binding::Type(TypeDef::derive("Zeta", &base, None)))
        .bind("Alpha", Binding::Type(TypeDef::derive("Alpha", root, None)))
        .bind("Color", Binding::Type(TypeDef::plain("Color")))
        .bind("WIDTH", Binding::Value(serde_json::json!(640)))
        .bind("helper", Binding::Function("helper".to_string()));

    let catalog = SceneCatalog::from_module(&module);
    let names: Vec<_> = catalog.names().collect();
    assert_eq!(names, ["Alpha", "ShapeScene", "Zeta"]);
    assert_eq!(catalog.get("ShapeScene"), Some(&base));
    assert!(catalog.get("Scene").is_none());
}

#[test]
fn catalog_is_keyed_by_binding_name() {
    let t = TypeDef::derive("Original", TypeDef::scene_root(), None);
    let module = SceneModule::new("m").bind("Alias", Binding::Type(t.clone()));
    let catalog = SceneCatalog::from_module(&module);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("Alias"), Some(&t));
}

#[test]
fn empty_module_gives_empty_catalog() {
    let catalog = SceneCatalog::from_module(&SceneModule::new("empty"));
    assert!(catalog.is_empty());
    assert_eq!(catalog.types().count(), 0);
}
