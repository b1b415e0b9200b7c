use sievedb::expression::BoxedExpression;
use sievedb::{parse_condition, Expression, SieveResult, TableFilter, Value};

/// Bind a parsed condition against the filter and let it derive index conditions
fn bind_and_extract(input: &str, filter: &mut TableFilter) -> SieveResult<BoxedExpression> {
    let mut condition = parse_condition(input)?;
    condition.map_columns(filter)?;
    condition.create_index_conditions(filter)
}

#[test]
fn test_and_extracts_from_both_sides() -> SieveResult<()> {
    let mut filter = TableFilter::new("t", &["id", "age"]);

    let condition = bind_and_extract("id = 1 AND age > 2", &mut filter)?;

    // The tree itself is unchanged; the filter learned both bounds
    assert_eq!(condition.to_sql(), "((id = 1) AND (age > 2))");

    let conditions = filter.index_conditions();
    assert_eq!(conditions.len(), 2);

    assert!(conditions[0].is_equality());
    assert_eq!(conditions[0].column(), "id");
    assert_eq!(conditions[0].column_index(), Some(0));
    assert_eq!(conditions[0].value(), &Value::integer(1));

    assert!(conditions[1].is_start());
    assert_eq!(conditions[1].column(), "age");
    assert_eq!(conditions[1].value(), &Value::integer(2));

    println!("✓ AND feeds index conditions from both operands");
    Ok(())
}

#[test]
fn test_or_is_opaque() -> SieveResult<()> {
    let mut filter = TableFilter::new("t", &["id", "age"]);

    // An OR branch alone does not imply the whole condition
    bind_and_extract("id = 1 OR age > 2", &mut filter)?;
    assert!(filter.index_conditions().is_empty());

    // ... even when the OR sits below an AND, only the other side contributes
    let mut filter = TableFilter::new("t", &["id", "age"]);
    bind_and_extract("id = 1 AND (age > 2 OR age < 0)", &mut filter)?;

    let conditions = filter.index_conditions();
    assert_eq!(conditions.len(), 1);
    assert_eq!(conditions[0].column(), "id");

    println!("✓ OR never produces index conditions");
    Ok(())
}

#[test]
fn test_operators_that_cannot_bound_a_scan() -> SieveResult<()> {
    for input in ["id <> 1", "id IS NULL", "id IS NOT NULL", "id = NULL", "NOT id = 1"] {
        let mut filter = TableFilter::new("t", &["id"]);
        bind_and_extract(input, &mut filter)?;
        assert!(
            filter.index_conditions().is_empty(),
            "{} must not produce an index condition",
            input
        );
    }
    Ok(())
}

#[test]
fn test_range_condition_classification() -> SieveResult<()> {
    let cases = [
        ("id = 5", true, false, false),
        ("id > 5", false, true, false),
        ("id >= 5", false, true, false),
        ("id < 5", false, false, true),
        ("id <= 5", false, false, true),
    ];

    for (input, equality, start, end) in cases {
        let mut filter = TableFilter::new("t", &["id"]);
        bind_and_extract(input, &mut filter)?;

        let conditions = filter.index_conditions();
        assert_eq!(conditions.len(), 1, "{}", input);
        assert_eq!(conditions[0].is_equality(), equality, "{}", input);
        assert_eq!(conditions[0].is_start(), start, "{}", input);
        assert_eq!(conditions[0].is_end(), end, "{}", input);
    }

    println!("✓ Index conditions classify as equality, start, and end bounds");
    Ok(())
}

#[test]
fn test_foreign_columns_are_ignored() -> SieveResult<()> {
    let mut filter = TableFilter::new("t", &["id"]);

    bind_and_extract("u.age > 2 AND id = 1", &mut filter)?;

    let conditions = filter.index_conditions();
    assert_eq!(conditions.len(), 1);
    assert_eq!(conditions[0].column(), "id");
    Ok(())
}

#[test]
fn test_nested_conjunctions_extract_all_comparisons() -> SieveResult<()> {
    let mut filter = TableFilter::new("t", &["id", "age"]);

    bind_and_extract(
        "(id = 1 AND age > 2) AND (age < 9 AND id >= 0)",
        &mut filter,
    )?;

    assert_eq!(filter.index_conditions().len(), 4);
    Ok(())
}
