#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes as a contract snapshot must fail cleanly,
    // never panic.
    let _ = staking_contract::StakingState::from_bytes(data);

    let _ = bincode::deserialize::<staking_rewards::BaseRewardHistory>(data);
    let _ = bincode::deserialize::<staking_rewards::StakeDeposit>(data);
    let _ = bincode::deserialize::<staking_types::Timestamp>(data);
});
