#![no_main]

use libfuzzer_sys::fuzz_target;

use staking_rewards::{BaseRewardHistory, RewardAccrualEngine, StakeDeposit};
use staking_types::{AccountId, Timestamp};

fn u64_at(data: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[at..at + 8]);
    u64::from_le_bytes(buf)
}

// Reward computation over arbitrary checkpoint histories, amounts and
// query times. Must never panic; overflow has to surface as an error.
fuzz_target!(|data: &[u8]| {
    if data.len() < 34 {
        return;
    }

    let amount = (u64_at(data, 0) as u128) << (data[32] % 64);
    let start = u64_at(data, 8) % 10_000_000;
    let query_time = u64_at(data, 16);
    let multiplier = u32::from(data[24] % 100);
    let start_index = u64::from(data[33] % 8);

    let mut history = BaseRewardHistory::new(u32::from(data[25] % 101), 0, Timestamp::new(0));

    let remaining = &data[34..];
    let mut offset = 0;
    let mut last_time = 0u64;
    while offset + 16 <= remaining.len() {
        let rate = (u64_at(remaining, offset) % 101) as u32;
        let time_offset = u64_at(remaining, offset + 8);

        last_time = last_time.saturating_add(time_offset % 2_000_000);
        let _ = history.append_checkpoint(rate, 0, Timestamp::new(last_time));

        offset += 16;
    }

    let deposit = StakeDeposit::new(
        AccountId::new("fuzz"),
        amount,
        Timestamp::new(start),
        start_index,
    );
    let engine = RewardAccrualEngine::new(&history, multiplier);

    // These must never panic
    let _ = engine.reward(&deposit, Timestamp::new(query_time));
    let _ = history.intervals_between(start_index, Timestamp::new(start), Timestamp::new(query_time));
});
