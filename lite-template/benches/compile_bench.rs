use std::collections::BTreeMap;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lite_dom::{h, text, Document, Props, VNode};
use lite_template::{MetadataStore, TemplateCompiler, ValueProvider, provider};
use serde_json::Value;

fn build_rows(count: usize) -> VNode {
    let mut children = Vec::with_capacity(count);
    for i in 0..count {
        let title = if i % 2 == 0 { "row ${item.name}" } else { "plain \"row\"" };
        children.push(h(
            "div",
            Props::new().set("title", title).prop("index", i as f64),
            vec![h("span", (), vec![text("${item.name} & <b>")])],
        ));
    }
    h("section", (), children)
}

fn bench_compile_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_rows");
    group.sample_size(20);
    let named: BTreeMap<String, ValueProvider<Value>> = BTreeMap::new();
    for &count in &[50usize, 200usize, 1000usize] {
        let vnode = build_rows(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &vnode, |b, v| {
            b.iter(|| {
                let mut doc = Document::new();
                let root = doc.build(v);
                let mut meta = MetadataStore::<Value>::new();
                for &row in doc.children(root).to_vec().iter().step_by(3) {
                    meta.node(&mut doc, row)
                        .with_attribute_binding("lang", provider(|item: &Value| item["lang"].clone()));
                }
                let compiled = TemplateCompiler::new(&mut doc, &meta)
                    .compile(&[root], &named)
                    .expect("compile");
                compiled.template.len()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compile_rows);
criterion_main!(benches);
