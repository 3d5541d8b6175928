//! Integration tests for the query builders.
//!
//! Tests the public API as users would interact with it. The dialect
//! output is deterministic, so assertions compare exact statement text.

#![allow(missing_docs)]

mod common;

use common::{Broken, MultiKey, OnlyKeys, Tag, User, Widget};
use jet_orm::{
    DataType, Dialect, Error, InsertBuilder, MappedType, SelectBuilder, UpdateBuilder,
    build_insert, build_select, build_update,
};

fn user() -> User {
    User { id: 12, name: "Ada".to_string(), surname: "Lovelace".to_string(), age: 36 }
}

// SELECT tests

#[test]
fn select_unbounded() {
    let query = SelectBuilder::<User>::new().build(&Dialect::access()).unwrap();
    assert_eq!(query.sql, "SELECT * FROM Users");
    assert!(query.params.is_empty());
}

#[test]
fn select_with_limit() {
    let query = SelectBuilder::<User>::new().limit(5).build(&Dialect::access()).unwrap();
    assert_eq!(query.sql, "SELECT TOP 5 * FROM Users");
    assert!(query.params.is_empty());
}

#[test]
fn select_limit_sqlite_dialect() {
    let query = SelectBuilder::<User>::new().limit(5).build(&Dialect::sqlite()).unwrap();
    assert_eq!(query.sql, "SELECT * FROM Users LIMIT 5");
}

#[test]
fn select_table_defaults_to_type_name() {
    let query = SelectBuilder::<Widget>::new().build(&Dialect::access()).unwrap();
    assert_eq!(query.sql, "SELECT * FROM Widget");
}

#[test]
fn select_blank_table_rejected() {
    let mapped = MappedType { table: "   ".to_string(), fields: Vec::new() };
    let err = build_select(&mapped, 0, &Dialect::access()).unwrap_err();
    assert!(matches!(err, Error::InvalidTableName));
}

// INSERT tests

#[test]
fn insert_excludes_primary_key() {
    let query = InsertBuilder::from_entity(&user()).build(&Dialect::access()).unwrap();

    assert_eq!(
        query.sql,
        "INSERT INTO Users ([Name], [Surname], [Age]) VALUES (@name, @surname, @age)"
    );

    let names: Vec<&str> = query.params.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["name", "surname", "age"]);
    assert_eq!(query.params[0].1, DataType::Str(Some("Ada".to_string())));
    assert_eq!(query.params[1].1, DataType::Str(Some("Lovelace".to_string())));
    assert_eq!(query.params[2].1, DataType::Int32(Some(36)));
}

#[test]
fn insert_excludes_every_key_field() {
    let entity = MultiKey { first: 1, label: "x".to_string(), second: 2 };
    let query = InsertBuilder::from_entity(&entity).build(&Dialect::access()).unwrap();

    assert_eq!(query.sql, "INSERT INTO Links ([Label]) VALUES (@label)");
    assert_eq!(query.params.len(), 1);
}

#[test]
fn insert_sqlite_dialect_quoting() {
    let query = InsertBuilder::from_entity(&user()).build(&Dialect::sqlite()).unwrap();
    assert_eq!(
        query.sql,
        "INSERT INTO Users (\"Name\", \"Surname\", \"Age\") VALUES (@name, @surname, @age)"
    );
}

#[test]
fn insert_all_keys_rejected() {
    let entity = OnlyKeys { left: 1, right: 2 };
    let err = InsertBuilder::from_entity(&entity).build(&Dialect::access()).unwrap_err();
    assert!(matches!(err, Error::InvalidInsert { table } if table == "Pairs"));
}

#[test]
fn empty_field_set_rejected() {
    let mapped = MappedType { table: "Empty".to_string(), fields: Vec::new() };

    let err = build_insert(&mapped, Vec::new(), &Dialect::access()).unwrap_err();
    assert!(matches!(err, Error::EmptyFieldSet { .. }));

    let err = build_update(&mapped, Vec::new(), &Dialect::access()).unwrap_err();
    assert!(matches!(err, Error::EmptyFieldSet { .. }));
}

#[test]
fn insert_missing_mapping_fails_before_sql() {
    let entity = Broken { id: 1, note: "n".to_string() };
    let err = InsertBuilder::from_entity(&entity).build(&Dialect::access()).unwrap_err();
    assert!(matches!(err, Error::MissingColumnMapping { entity: "Broken", field: "note" }));
}

// UPDATE tests

#[test]
fn update_targets_one_key() {
    let query = UpdateBuilder::from_entity(&user()).build(&Dialect::access()).unwrap();

    assert_eq!(
        query.sql,
        "UPDATE Users SET [Name]=@name, [Surname]=@surname, [Age]=@age WHERE [ID]=@id"
    );

    // key parameter is bound last, after all SET parameters
    let names: Vec<&str> = query.params.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["name", "surname", "age", "id"]);
    assert_eq!(query.params[3].1, DataType::Int32(Some(12)));
}

#[test]
fn update_last_declared_key_wins() {
    let entity = MultiKey { first: 1, label: "x".to_string(), second: 2 };
    let query = UpdateBuilder::from_entity(&entity).build(&Dialect::access()).unwrap();

    assert_eq!(query.sql, "UPDATE Links SET [Label]=@label WHERE [Second]=@second");

    let names: Vec<&str> = query.params.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["label", "second"]);
    assert_eq!(query.params[1].1, DataType::Int32(Some(2)));
}

#[test]
fn update_without_key_rejected() {
    let entity = Tag { name: "news".to_string() };
    let err = UpdateBuilder::from_entity(&entity).build(&Dialect::access()).unwrap_err();
    assert!(matches!(err, Error::NoPrimaryKey { table } if table == "Tags"));
}

#[test]
fn update_missing_mapping_fails_before_sql() {
    let entity = Broken { id: 1, note: "n".to_string() };
    let err = UpdateBuilder::from_entity(&entity).build(&Dialect::access()).unwrap_err();
    assert!(matches!(err, Error::MissingColumnMapping { field: "note", .. }));
}
