use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use staking_rewards::{BaseRewardHistory, RewardAccrualEngine, StakeDeposit};
use staking_types::{AccountId, Timestamp, SECS_PER_DAY};

fn make_history_with_checkpoints(n: usize) -> BaseRewardHistory {
    let mut history = BaseRewardHistory::new(17, 0, Timestamp::new(0));
    for i in 1..n {
        let at = Timestamp::new(i as u64 * SECS_PER_DAY);
        let rate = [17, 19, 21, 23, 0][i % 5];
        history
            .append_checkpoint(rate, i as u128 * 1_000, at)
            .unwrap();
    }
    history
}

fn bench_reward_computation(c: &mut Criterion) {
    let mut group = c.benchmark_group("reward");
    let deposit = StakeDeposit::new(AccountId::new("bench"), 1_000_000, Timestamp::new(0), 0);

    for checkpoint_count in [1, 10, 100, 1000] {
        let history = make_history_with_checkpoints(checkpoint_count);
        let engine = RewardAccrualEngine::new(&history, 5);
        let as_of = Timestamp::new((checkpoint_count as u64 + 30) * SECS_PER_DAY);

        group.bench_with_input(
            BenchmarkId::new("reward", checkpoint_count),
            &checkpoint_count,
            |b, _| {
                b.iter(|| black_box(engine.reward(black_box(&deposit), black_box(as_of))));
            },
        );
    }

    group.finish();
}

fn bench_intervals_between(c: &mut Criterion) {
    let mut group = c.benchmark_group("intervals_between");

    for checkpoint_count in [1, 10, 100, 1000] {
        let history = make_history_with_checkpoints(checkpoint_count);
        let to = Timestamp::new(checkpoint_count as u64 * SECS_PER_DAY);

        group.bench_with_input(
            BenchmarkId::new("intervals_between", checkpoint_count),
            &checkpoint_count,
            |b, _| {
                b.iter(|| {
                    black_box(history.intervals_between(
                        black_box(0),
                        black_box(Timestamp::new(0)),
                        black_box(to),
                    ))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reward_computation, bench_intervals_between);
criterion_main!(benches);
