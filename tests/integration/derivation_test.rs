use sqleq_symtab::env::{Formula, SymbolicEnv, Term};
use sqleq_symtab::{
    ColumnType, ErrorKind, Session, SessionConfig, SymtabError, TableIdSource, TableSchema,
    create_empty_table,
};

use crate::{SCHEMA, init_tracing};

#[test]
fn test_group_by_then_rename_keeps_bookkeeping_in_sync() {
    init_tracing();
    let mut session = Session::with_config(SessionConfig::default().with_default_bound(2));
    let mut registry = session.load_schema(SCHEMA).unwrap();
    assert_eq!(registry.len(), 3);

    let customers = registry.ids_named("Customers")[0];
    let bound = registry.table(customers).unwrap().bound();

    // GROUP BY customer_id over Customers
    let mut grouped = TableSchema::derived(
        session.next_table_id(),
        "customers_grouped",
        bound,
        vec![registry.ancestor(customers).unwrap()],
    );
    grouped.push_column("customer_id", ColumnType::Int);
    grouped.push_column("cnt", ColumnType::Int);
    grouped.ctx().groups_considered().insert(1);
    grouped.ctx().groups_considered().insert(2);
    let grouped_id = registry.register(grouped).unwrap();

    // Subquery alias `T` over the grouped result
    let alias = TableSchema::derived(
        session.next_table_id(),
        "T",
        bound,
        vec![registry.ancestor(grouped_id).unwrap()],
    );
    let alias_id = registry.register(alias).unwrap();

    let summary = registry
        .propagate_grouping(grouped_id, alias_id, &mut session)
        .unwrap();
    assert_eq!(summary.group_slots, 2);
    assert_eq!(summary.tuple_slots, 2);
    assert_eq!(summary.assertions, 5);
    assert_eq!(session.formulas().len(), 5);

    let grouped = registry.table(grouped_id).unwrap();
    let alias = registry.table(alias_id).unwrap();
    assert!(alias.ctx().groups_considered().ptr_eq(&grouped.ctx().groups_considered()));
    assert!(alias.lineage().ptr_eq(&grouped.lineage()));
    assert_eq!(alias.lineage().sources(), vec![customers]);
    assert!(session.is_consistent());

    // The alias now has the same row count as its source.
    let grouped_size = session.size(grouped_id);
    let alias_size = session.size(alias_id);
    session.assert(Formula::equal(grouped_size, Term::Int(1)), "test");
    session.assert(Formula::equal(alias_size, Term::Int(2)), "test");
    assert!(!session.is_consistent());
}

#[test]
fn test_derived_table_tracks_ancestor_through_later_propagation() {
    let mut session = Session::new();
    let mut registry = session.load_schema(SCHEMA).unwrap();
    let customers = registry.ids_named("Customers")[0];

    let grouped = TableSchema::derived(
        session.next_table_id(),
        "G",
        2,
        vec![registry.ancestor(customers).unwrap()],
    );
    grouped.ctx().groups_considered().insert(2);
    let grouped_id = registry.register(grouped).unwrap();
    let alias = TableSchema::derived(
        session.next_table_id(),
        "A",
        2,
        vec![registry.ancestor(grouped_id).unwrap()],
    );
    let alias_id = registry.register(alias).unwrap();

    // `D` holds `A` as its ancestor before `A` is tied to `G`.
    let downstream = TableSchema::derived(
        session.next_table_id(),
        "D",
        2,
        vec![registry.ancestor(alias_id).unwrap()],
    );
    registry
        .propagate_grouping(grouped_id, alias_id, &mut session)
        .unwrap();

    let held = &downstream.ancestors()[0];
    let live = registry.table(grouped_id).unwrap();
    assert_eq!(held.ctx().groups_considered().to_vec(), vec![2]);
    assert!(held.ctx().groups_considered().ptr_eq(&live.ctx().groups_considered()));
    assert!(held.lineage().ptr_eq(&live.lineage()));
}

#[test]
fn test_failed_propagations_leave_store_untouched() {
    let mut session = Session::new();
    let mut registry = session.load_schema(SCHEMA).unwrap();
    let customers = registry.ids_named("customers")[0];
    let invoices = registry.ids_named("invoices")[0];

    let err = registry
        .propagate_grouping(customers, invoices, &mut session)
        .unwrap_err();
    assert!(matches!(err, SymtabError::NoAncestors { .. }));
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let err = registry
        .propagate_grouping(customers, customers, &mut session)
        .unwrap_err();
    assert!(matches!(err, SymtabError::SelfPropagation { .. }));

    let missing = session.next_table_id();
    let err = registry
        .propagate_grouping(customers, missing, &mut session)
        .unwrap_err();
    assert!(matches!(err, SymtabError::UnknownTable(id) if id == missing));

    // A grouped table with no hypotheses yet.
    let grouped = TableSchema::derived(
        session.next_table_id(),
        "g",
        2,
        vec![registry.ancestor(customers).unwrap()],
    );
    let grouped_id = registry.register(grouped).unwrap();
    let err = registry
        .propagate_grouping(grouped_id, invoices, &mut session)
        .unwrap_err();
    assert!(matches!(err, SymtabError::NoGroupsConsidered { .. }));

    assert!(session.formulas().is_empty());
    // Tables are still registered after the failures.
    assert_eq!(registry.len(), 4);
    assert!(registry.get(invoices).is_some());
}

#[test]
fn test_placeholders_are_told_apart_by_id() {
    let mut session = Session::new();
    let mut registry = session.load_schema(SCHEMA).unwrap();

    let first = create_empty_table(2, 3, &mut session).unwrap();
    let second = create_empty_table(2, 3, &mut session).unwrap();
    let first_id = registry.register(first).unwrap();
    let second_id = registry.register(second).unwrap();

    assert_ne!(first_id, second_id);
    assert!(first_id < second_id);
    assert_eq!(registry.ids_named("empty_table_2x3"), vec![first_id, second_id]);
    assert_eq!(registry.table(second_id).unwrap().arity(), 3);
    assert!(session.formulas().is_empty());
}

#[test]
fn test_placeholder_as_propagation_target() {
    let mut session = Session::new();
    let base = std::rc::Rc::new(TableSchema::new(session.next_table_id(), "R", 3));
    let except = TableSchema::derived(session.next_table_id(), "except", 3, vec![base]);
    except.ctx().groups_considered().insert(3);

    let mut target = create_empty_table(3, 1, &mut session).unwrap();
    let summary =
        sqleq_symtab::propagate_grouping(&except, &mut target, &mut session).unwrap();

    assert_eq!(summary.assertions, 3 * 3 + 1);
    assert_eq!(target.ctx().groups_considered().to_vec(), vec![3]);
}
