use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ledgerdesk_accounting::AccountGroupRecord;
use ledgerdesk_core::GroupNumber;
use ledgerdesk_desktop::engine::reconcile;
use ledgerdesk_desktop::views::{GroupKind, GroupView};
use ledgerdesk_events::ObservableCollection;

fn records(count: i32, suffix: &str) -> Vec<AccountGroupRecord> {
    (1..=count)
        .map(|n| AccountGroupRecord {
            number: GroupNumber::new(n),
            name: format!("Group {n}{suffix}"),
        })
        .collect()
}

fn reconcile_groups(local: &ObservableCollection<GroupView>, remote: &[AccountGroupRecord]) -> usize {
    let outcome = reconcile(
        local,
        remote,
        |record| record.number,
        |group, record| {
            group.set_name(record.name.clone());
        },
        |record| GroupView::new(GroupKind::Account, record.number, record.name.clone()),
    );
    outcome.inserted.len() + outcome.updated
}

fn bench_reconcile_into_empty(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile_into_empty");
    for size in [10i32, 100, 1_000] {
        let remote = records(size, "");
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &remote, |b, remote| {
            b.iter(|| {
                let local = ObservableCollection::new("account groups");
                black_box(reconcile_groups(&local, remote))
            });
        });
    }
    group.finish();
}

fn bench_reconcile_existing(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile_existing");
    for size in [10i32, 100, 1_000] {
        let local = ObservableCollection::new("account groups");
        reconcile_groups(&local, &records(size, ""));
        let unchanged = records(size, "");
        let renamed = records(size, " (renamed)");

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("unchanged", size), &unchanged, |b, remote| {
            b.iter(|| black_box(reconcile_groups(&local, remote)));
        });
        group.bench_with_input(BenchmarkId::new("alternating_names", size), &size, |b, _| {
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let remote = if flip { &renamed } else { &unchanged };
                black_box(reconcile_groups(&local, remote))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconcile_into_empty, bench_reconcile_existing);
criterion_main!(benches);
