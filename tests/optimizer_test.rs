use pretty_assertions::assert_eq;
use rand::Rng;

use sievedb::expression::BoxedExpression;
use sievedb::{
    parse_condition, ComparisonExpression, ComparisonOp, ConjunctionExpression, ConstantExpression,
    Expression, NotExpression, PlanContext, PlannerSettings, Row, SieveResult, TruthValue, Value,
};

fn constant(value: TruthValue) -> BoxedExpression {
    Box::new(ConstantExpression::new(value))
}

fn comparison(column: &str, value: i64) -> BoxedExpression {
    Box::new(ComparisonExpression::new(
        None,
        column,
        ComparisonOp::Equal,
        Value::integer(value),
    ))
}

#[test]
fn test_both_constant_operands_fold() -> SieveResult<()> {
    let ctx = PlanContext::new();

    let condition: BoxedExpression = Box::new(ConjunctionExpression::and(
        constant(TruthValue::True),
        constant(TruthValue::Unknown),
    ));
    let optimized = condition.optimize(&ctx)?;

    assert!(optimized.is_constant());
    assert_eq!(optimized.to_sql(), "NULL");
    assert_eq!(optimized.evaluate(&Row::empty())?, TruthValue::Unknown);

    let condition: BoxedExpression = Box::new(ConjunctionExpression::or(
        constant(TruthValue::False),
        constant(TruthValue::False),
    ));
    assert_eq!(condition.optimize(&ctx)?.to_sql(), "FALSE");

    println!("✓ Conjunctions of two constants fold to a constant");
    Ok(())
}

#[test]
fn test_one_constant_operand_rules() -> SieveResult<()> {
    use sievedb::ConjunctionType::{And, Or};
    use TruthValue::{False, True};

    let ctx = PlanContext::new();

    // Absorbing and identity rules, with the constant on either side
    let cases = [
        (And, Some(True), None, "(a = 1)"),
        (And, None, Some(True), "(a = 1)"),
        (And, Some(False), None, "FALSE"),
        (And, None, Some(False), "FALSE"),
        (Or, Some(True), None, "TRUE"),
        (Or, None, Some(True), "TRUE"),
        (Or, Some(False), None, "(a = 1)"),
        (Or, None, Some(False), "(a = 1)"),
    ];

    for (conjunction_type, left_constant, right_constant, expected) in cases {
        let left = match left_constant {
            Some(value) => constant(value),
            None => comparison("a", 1),
        };
        let right = match right_constant {
            Some(value) => constant(value),
            None => comparison("a", 1),
        };
        let condition: BoxedExpression =
            Box::new(ConjunctionExpression::new(conjunction_type, left, right));
        assert_eq!(condition.optimize(&ctx)?.to_sql(), expected);
    }

    println!("✓ One-constant conjunctions simplify correctly");
    Ok(())
}

#[test]
fn test_unknown_constant_blocks_simplification() -> SieveResult<()> {
    let ctx = PlanContext::new();

    // UNKNOWN still interacts with the other side, so it must survive.
    // The constant is cheaper than the comparison and moves to the left.
    let condition: BoxedExpression = Box::new(ConjunctionExpression::and(
        comparison("a", 1),
        constant(TruthValue::Unknown),
    ));
    assert_eq!(condition.optimize(&ctx)?.to_sql(), "(NULL AND (a = 1))");

    let condition: BoxedExpression = Box::new(ConjunctionExpression::or(
        comparison("a", 1),
        constant(TruthValue::Unknown),
    ));
    assert_eq!(condition.optimize(&ctx)?.to_sql(), "(NULL OR (a = 1))");

    println!("✓ UNKNOWN operands are never folded away");
    Ok(())
}

#[test]
fn test_cheaper_operand_moves_left() -> SieveResult<()> {
    let ctx = PlanContext::new();

    let nested = ConjunctionExpression::and(comparison("a", 1), comparison("b", 2));
    let condition: BoxedExpression = Box::new(ConjunctionExpression::and(
        Box::new(nested),
        comparison("c", 3),
    ));

    // The single comparison is cheaper than the nested conjunction
    let optimized = condition.optimize(&ctx)?;
    assert_eq!(optimized.to_sql(), "((c = 3) AND ((a = 1) AND (b = 2)))");
    Ok(())
}

#[test]
fn test_equal_cost_operands_keep_their_order() -> SieveResult<()> {
    let ctx = PlanContext::new();

    let condition: BoxedExpression = Box::new(ConjunctionExpression::and(
        comparison("a", 1),
        comparison("b", 2),
    ));
    assert_eq!(condition.optimize(&ctx)?.to_sql(), "((a = 1) AND (b = 2))");
    Ok(())
}

#[test]
fn test_reordering_can_be_disabled() -> SieveResult<()> {
    let ctx = PlanContext::with_settings(PlannerSettings {
        reorder_conjuncts: false,
        fold_constants: true,
    });

    let nested = ConjunctionExpression::and(comparison("a", 1), comparison("b", 2));
    let condition: BoxedExpression = Box::new(ConjunctionExpression::and(
        Box::new(nested),
        comparison("c", 3),
    ));
    assert_eq!(
        condition.optimize(&ctx)?.to_sql(),
        "(((a = 1) AND (b = 2)) AND (c = 3))"
    );
    Ok(())
}

#[test]
fn test_folding_can_be_disabled() -> SieveResult<()> {
    let ctx = PlanContext::with_settings(PlannerSettings {
        reorder_conjuncts: false,
        fold_constants: false,
    });

    let condition: BoxedExpression = Box::new(ConjunctionExpression::and(
        constant(TruthValue::True),
        comparison("a", 1),
    ));
    assert_eq!(condition.optimize(&ctx)?.to_sql(), "(TRUE AND (a = 1))");
    Ok(())
}

#[test]
fn test_null_literal_comparison_folds_to_unknown() -> SieveResult<()> {
    let ctx = PlanContext::new();

    let condition = parse_condition("a = NULL")?;
    assert_eq!(condition.optimize(&ctx)?.to_sql(), "NULL");

    // IS NULL is a null test, not a comparison against NULL; it survives
    let condition = parse_condition("a IS NULL")?;
    assert_eq!(condition.optimize(&ctx)?.to_sql(), "(a IS NULL)");
    Ok(())
}

#[test]
fn test_not_is_pushed_into_comparisons() -> SieveResult<()> {
    let ctx = PlanContext::new();

    let condition = parse_condition("NOT a >= 10")?;
    assert_eq!(condition.optimize(&ctx)?.to_sql(), "(a < 10)");

    let condition = parse_condition("NOT TRUE")?;
    assert_eq!(condition.optimize(&ctx)?.to_sql(), "FALSE");

    let condition = parse_condition("NOT NULL")?;
    assert_eq!(condition.optimize(&ctx)?.to_sql(), "NULL");

    println!("✓ NOT nodes fold into their operands");
    Ok(())
}

fn random_leaf(rng: &mut impl Rng) -> BoxedExpression {
    if rng.random_bool(0.25) {
        let value = match rng.random_range(0..3) {
            0 => TruthValue::True,
            1 => TruthValue::False,
            _ => TruthValue::Unknown,
        };
        return Box::new(ConstantExpression::new(value));
    }

    let column = ["a", "b", "c"][rng.random_range(0..3)];
    if rng.random_bool(0.1) {
        return Box::new(ComparisonExpression::is_null(None, column));
    }

    let op = [
        ComparisonOp::Equal,
        ComparisonOp::NotEqual,
        ComparisonOp::LessThan,
        ComparisonOp::LessThanOrEqual,
        ComparisonOp::GreaterThan,
        ComparisonOp::GreaterThanOrEqual,
    ][rng.random_range(0..6)];
    let value = if rng.random_bool(0.15) {
        Value::Null
    } else {
        Value::integer(rng.random_range(0..4))
    };
    Box::new(ComparisonExpression::new(None, column, op, value))
}

fn random_condition(rng: &mut impl Rng, depth: u32) -> BoxedExpression {
    if depth == 0 || rng.random_bool(0.3) {
        return random_leaf(rng);
    }
    match rng.random_range(0..3) {
        0 => Box::new(ConjunctionExpression::and(
            random_condition(rng, depth - 1),
            random_condition(rng, depth - 1),
        )),
        1 => Box::new(ConjunctionExpression::or(
            random_condition(rng, depth - 1),
            random_condition(rng, depth - 1),
        )),
        _ => Box::new(NotExpression::new(random_condition(rng, depth - 1))),
    }
}

fn random_row(rng: &mut impl Rng) -> Row {
    let mut row = Row::new();
    for column in ["a", "b", "c"] {
        let value = if rng.random_bool(0.2) {
            Value::Null
        } else {
            Value::integer(rng.random_range(0..4))
        };
        row = row.with_value(None, column, value);
    }
    row
}

#[test]
fn test_optimize_preserves_evaluation() -> SieveResult<()> {
    let ctx = PlanContext::new();
    let mut rng = rand::rng();

    for _ in 0..200 {
        let condition = random_condition(&mut rng, 4);
        let original = condition.clone();
        let optimized = condition.optimize(&ctx)?;

        for _ in 0..20 {
            let row = random_row(&mut rng);
            assert_eq!(
                original.evaluate(&row)?,
                optimized.evaluate(&row)?,
                "optimization changed the result of {}",
                original.to_sql()
            );
        }
    }

    println!("✓ Optimization never changes evaluation results");
    Ok(())
}
