use criterion::*;

use quasi::{
    build_call, eval, prim, quote_explicit, quote_with_expansion, Node, Syntax, SyntaxArg,
    TemplateArg, Value,
};

fn wide_call(width: usize) -> Syntax {
    let args = (0..width)
        .map(|i| {
            if i % 2 == 0 {
                SyntaxArg::positional(Syntax::unquote(Syntax::ident("x")))
            } else {
                SyntaxArg::positional(Syntax::unquote_splice(Syntax::ident("xs")))
            }
        })
        .collect();
    Syntax::apply(Syntax::ident("f"), args)
}

fn bench_explicit_quote(c: &mut Criterion) {
    let syntax = wide_call(64);
    c.bench_function("explicit quote (64 arguments)", |b| {
        b.iter(|| black_box(quote_explicit(&syntax)))
    });
}

fn bench_expansion(c: &mut Criterion) {
    let env = prim::base_env();
    env.bind("x", 1);
    env.bind("xs", Value::list(vec![1, 2, 3]));
    let syntax = wide_call(64);
    c.bench_function("expansion (64 markers)", |b| {
        b.iter(|| black_box(quote_with_expansion(&syntax, &env)))
    });
}

fn bench_build_call(c: &mut Criterion) {
    let env = prim::base_env();
    c.bench_function("build call with defined name", |b| {
        b.iter(|| {
            black_box(build_call(
                "foo",
                vec![TemplateArg::define(
                    Node::constant("x"),
                    Node::constant(10),
                )],
                &env,
            ))
        })
    });
}

fn bench_eval_arithmetic(c: &mut Criterion) {
    let env = prim::base_env();
    let sum = (1..100).fold(Syntax::from(0), |acc, i| {
        Syntax::apply(
            Syntax::ident("+"),
            vec![SyntaxArg::positional(acc), SyntaxArg::positional(Syntax::from(i))],
        )
    });
    let node = quote_explicit(&sum);
    c.bench_function("evaluate nested sum", |b| {
        b.iter(|| black_box(eval(&node, &env)))
    });
}

fn bench_printing(c: &mut Criterion) {
    let node = quote_explicit(&wide_call(64));
    c.bench_function("printing", |b| b.iter(|| black_box(node.to_string())));
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = bench_explicit_quote, bench_expansion, bench_build_call, bench_eval_arithmetic, bench_printing
}
criterion_main!(benches);
