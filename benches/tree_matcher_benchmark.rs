//! Tree matcher and status detection benchmarks
//!
//! - synthetic wide/deep trees built in memory
//! - full parse + detection on a large admin page

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use yadmin_probe::domain::{find_matching_nodes, is_login_password_input, DocumentNode, DocumentTree};
use yadmin_probe::detect_status;

/// `depth` levels, each element with `fan_out` children; one password field at the bottom
fn synthetic_tree(depth: usize, fan_out: usize) -> DocumentTree {
    let mut tree = DocumentTree::document();
    let mut level = vec![tree.root_id()];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(level.len() * fan_out);
        for parent in &level {
            for _ in 0..fan_out {
                next.push(tree.append_element(*parent, "div", &[("class", "row")]));
            }
        }
        level = next;
    }
    if let Some(last) = level.last() {
        tree.append_element(*last, "input", &[("type", "password"), ("name", "pwd")]);
    }
    tree
}

fn large_login_page(rows: usize) -> String {
    let mut page = String::from("<html><body><table>");
    for i in 0..rows {
        page.push_str(&format!(
            r#"<tr><td><a href="/item/{i}">item {i}</a></td><td><input type="text" name="q{i}"></td></tr>"#
        ));
    }
    page.push_str(r#"</table><form><input type="password" name="pwd"></form></body></html>"#);
    page
}

fn bench_tree_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matching_nodes");
    for (depth, fan_out) in [(4, 8), (8, 3), (2, 64)] {
        let tree = synthetic_tree(depth, fan_out);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("depth{depth}_fan{fan_out}")),
            &tree,
            |b, tree| {
                b.iter(|| {
                    let found = find_matching_nodes(
                        Some(black_box(tree.root())),
                        Some(is_login_password_input::<DocumentNode<'_>>),
                    );
                    black_box(found.len())
                });
            },
        );
    }
    group.finish();
}

fn bench_detect_status(c: &mut Criterion) {
    let page = large_login_page(2_000);
    c.bench_function("detect_status_2000_rows", |b| {
        b.iter(|| detect_status(black_box(&page)).map(|s| s.initialized))
    });
}

criterion_group!(benches, bench_tree_matcher, bench_detect_status);
criterion_main!(benches);
