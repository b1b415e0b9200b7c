use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use sievedb::expression::BoxedExpression;
use sievedb::{
    parse_condition, ComparisonExpression, ComparisonOp, ConjunctionExpression, Expression,
    PlanContext, Row, Value,
};

const CHAIN_WIDTH: usize = 64;

fn comparison(i: usize, op: ComparisonOp) -> BoxedExpression {
    Box::new(ComparisonExpression::new(
        None,
        &format!("c{}", i),
        op,
        Value::integer(i as i64),
    ))
}

fn build_and_chain(first_op: ComparisonOp) -> BoxedExpression {
    let mut condition = comparison(0, first_op);
    for i in 1..CHAIN_WIDTH {
        condition = Box::new(ConjunctionExpression::and(
            condition,
            comparison(i, ComparisonOp::Equal),
        ));
    }
    condition
}

fn build_row() -> Row {
    let mut row = Row::new();
    for i in 0..CHAIN_WIDTH {
        row = row.with_value(None, &format!("c{}", i), Value::integer(i as i64));
    }
    row
}

fn bench_evaluate(c: &mut Criterion) {
    let row = build_row();

    // Every conjunct matches, so the whole chain is walked
    let full_chain = build_and_chain(ComparisonOp::Equal);
    c.bench_function("evaluate_and_chain", |b| {
        b.iter(|| full_chain.evaluate(black_box(&row)))
    });

    // The innermost conjunct fails, short-circuiting every level above it
    let short_circuit = build_and_chain(ComparisonOp::NotEqual);
    c.bench_function("evaluate_short_circuit", |b| {
        b.iter(|| short_circuit.evaluate(black_box(&row)))
    });
}

fn bench_optimize(c: &mut Criterion) {
    let ctx = PlanContext::new();
    c.bench_function("optimize_and_chain", |b| {
        b.iter(|| {
            let condition = build_and_chain(ComparisonOp::Equal);
            black_box(condition.optimize(&ctx))
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    let rendered = build_and_chain(ComparisonOp::Equal).to_sql();
    c.bench_function("parse_and_chain", |b| {
        b.iter(|| parse_condition(black_box(&rendered)))
    });
}

criterion_group!(benches, bench_evaluate, bench_optimize, bench_parse);
criterion_main!(benches);
